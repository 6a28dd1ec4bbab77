//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories) are implemented by outbound adapters; driving
//! ports (queries) are implemented by domain services and consumed by
//! inbound adapters.

mod user_repository;
mod users_query;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{InMemoryUserRepository, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
