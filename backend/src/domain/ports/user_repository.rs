//! Port abstraction for user persistence adapters and their errors.
//!
//! The capability set is deliberately small: fetch every user, insert one
//! user. [`InMemoryUserRepository`] is the deterministic test double; the
//! Diesel adapter under `outbound::persistence` is the production
//! implementation.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewUser, User, UserId};

/// Failure raised by a user repository adapter.
///
/// Every backend failure collapses into this single kind; the message keeps
/// the backend's own description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("user repository query failed: {message}")]
pub struct UserPersistenceError {
    message: String,
}

impl UserPersistenceError {
    /// Wrap a backend failure description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Backend-provided failure description.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Port for user storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch every stored user in backend order.
    async fn fetch_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Insert a user and return the stored record with its assigned id.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    users: Vec<User>,
    next_id: UserId,
    failure: Option<String>,
}

/// Process-local repository keeping users in insertion order.
///
/// Identifiers start at 1 and increase by one per insert, mirroring a
/// `BIGSERIAL` column.
///
/// # Examples
/// ```
/// use crud_backend::domain::NewUser;
/// use crud_backend::domain::ports::{InMemoryUserRepository, UserRepository};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repository = InMemoryUserRepository::default();
/// let alice = repository
///     .insert(&NewUser::new("Alice", "alice@example.com"))
///     .await
///     .expect("insert succeeds");
/// assert_eq!(alice.id, 1);
/// assert_eq!(repository.fetch_all().await.expect("fetch succeeds"), vec![alice]);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<InMemoryState>,
}

impl InMemoryUserRepository {
    /// Create a repository pre-populated with `users`.
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|user| user.id).max().unwrap_or(0);
        Self {
            state: Mutex::new(InMemoryState {
                users,
                next_id,
                failure: None,
            }),
        }
    }

    /// Make every subsequent call fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.lock().failure = Some(message.into());
    }

    /// Clear a failure installed by [`Self::fail_with`].
    pub fn recover(&self) {
        self.lock().failure = None;
    }

    fn lock(&self) -> MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn fetch_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock();
        if let Some(message) = &state.failure {
            return Err(UserPersistenceError::new(message.clone()));
        }
        Ok(state.users.clone())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock();
        if let Some(message) = &state.failure {
            return Err(UserPersistenceError::new(message.clone()));
        }
        let id = state
            .next_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::new("user id sequence exhausted"))?;
        state.next_id = id;
        let stored = user.clone().into_user(id);
        state.users.push(stored.clone());
        Ok(stored)
    }
}
