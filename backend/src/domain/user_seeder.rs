//! Example user seeding.
//!
//! Inserts a fixed set of users through the [`UserRepository`] port when the
//! backend holds no users yet. Running it again against a populated backend
//! is a no-op.

use std::sync::Arc;

use tracing::info;

use crate::domain::NewUser;
use crate::domain::ports::{UserPersistenceError, UserRepository};

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The backend was empty; `inserted` users were written.
    Applied {
        /// Number of users inserted.
        inserted: usize,
    },
    /// The backend already held `existing` users; nothing was written.
    AlreadySeeded {
        /// Number of users found.
        existing: usize,
    },
}

/// The users inserted by default: Alice, then Bob.
pub fn example_users() -> Vec<NewUser> {
    vec![
        NewUser::new("Alice", "alice@example.com"),
        NewUser::new("Bob", "bob@example.com"),
    ]
}

/// Seeds users into an empty backend.
pub struct UserSeeder<R: ?Sized> {
    repository: Arc<R>,
}

impl<R> UserSeeder<R>
where
    R: UserRepository + ?Sized,
{
    /// Create a seeder writing through `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Insert `users` in order unless the backend already holds users.
    ///
    /// Inserts are not wrapped in a transaction; a failure part-way leaves
    /// the earlier rows in place.
    pub async fn seed(&self, users: &[NewUser]) -> Result<SeedOutcome, UserPersistenceError> {
        let existing = self.repository.fetch_all().await?.len();
        if existing > 0 {
            info!(existing, "users already present; seeding skipped");
            return Ok(SeedOutcome::AlreadySeeded { existing });
        }

        for user in users {
            self.repository.insert(user).await?;
        }
        info!(inserted = users.len(), "example users seeded");
        Ok(SeedOutcome::Applied {
            inserted: users.len(),
        })
    }
}
