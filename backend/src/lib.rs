//! User directory backend library.
//!
//! Layers, leaf to root: [`domain`] records, ports and services;
//! [`outbound`] persistence adapters; [`inbound`] HTTP handlers.
//! [`settings`] and [`startup`] hold the bootstrap pieces used by the
//! binaries.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
pub mod startup;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
