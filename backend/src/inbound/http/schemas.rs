//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; the
//! wrappers here mirror their shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Backend-assigned identifier.
    #[schema(example = 1)]
    id: i64,
    /// Display name.
    #[schema(example = "Alice")]
    name: String,
    /// Contact email address.
    #[schema(example = "alice@example.com")]
    email: String,
}
