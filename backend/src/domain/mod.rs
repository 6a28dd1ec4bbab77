//! Domain models, ports and services.
//!
//! Purpose: hold the transport- and storage-agnostic core. Adapters under
//! `inbound` and `outbound` depend on this module, never the other way round.
//!
//! Public surface:
//! - User / NewUser — plain user records.
//! - AppError — uniform code + message failure.
//! - UserService — the "list all users" use case.
//! - UserSeeder — inserts example users into an empty backend.
//! - TraceId — request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_seeder;
pub mod user_service;

pub use self::error::{AppError, INTERNAL_ERROR_CODE};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserId};
pub use self::user_seeder::{SeedOutcome, UserSeeder, example_users};
pub use self::user_service::UserService;
