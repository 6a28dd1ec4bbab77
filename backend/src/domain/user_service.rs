//! User listing service.
//!
//! Implements the [`UsersQuery`] driving port by delegating straight to the
//! [`UserRepository`] port. Results pass through unchanged; a repository
//! failure becomes an [`AppError`] carrying the repository error's text.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserRepository, UsersQuery};
use crate::domain::{AppError, User};

/// Service exposing the "list all users" use case.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use crud_backend::domain::UserService;
/// use crud_backend::domain::ports::{InMemoryUserRepository, UsersQuery};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let service = UserService::new(Arc::new(InMemoryUserRepository::default()));
/// assert!(service.list_users().await.expect("listing succeeds").is_empty());
/// # });
/// ```
pub struct UserService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> UserService<R> {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = self.repository.fetch_all().await?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }
}
