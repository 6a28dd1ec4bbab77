//! Domain-level error type.
//!
//! `AppError` is the uniform failure returned to callers at the boundary: a
//! numeric code paired with a human-readable message. It is transport
//! agnostic; the HTTP adapter maps `code` onto a response status.

use std::fmt;

use crate::domain::ports::UserPersistenceError;

/// Code used for every backend failure.
pub const INTERNAL_ERROR_CODE: u16 = 500;

/// Uniform failure value carried from the service layer to adapters.
///
/// # Examples
/// ```
/// use crud_backend::domain::AppError;
///
/// let err = AppError::internal("connection refused");
/// assert_eq!(err.code(), 500);
/// assert_eq!(err.message(), "connection refused");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    code: u16,
    message: String,
}

impl AppError {
    /// Create an error from a code and message.
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Convenience constructor for [`INTERNAL_ERROR_CODE`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR_CODE, message)
    }

    /// Numeric failure code.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

impl From<UserPersistenceError> for AppError {
    fn from(value: UserPersistenceError) -> Self {
        Self::internal(value.to_string())
    }
}
