//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` when a migration changes the schema.

diesel::table! {
    /// Users table. `id` is a `BIGSERIAL` assigned on insert.
    users (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
    }
}
