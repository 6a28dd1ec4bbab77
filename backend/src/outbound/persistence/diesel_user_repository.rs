//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Thin adapter: translates between Diesel rows and domain users and maps
//! every pool or Diesel failure onto [`UserPersistenceError`], keeping the
//! backend's own error text.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    debug!(%error, "user repository connection checkout failed");
    UserPersistenceError::new(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error, operation: &'static str) -> UserPersistenceError {
    use diesel::result::Error as DieselError;

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        _ => debug!(%error, operation, "diesel operation failed"),
    }
    UserPersistenceError::new(error.to_string())
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn fetch_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Ascending serial ids give insertion order.
        let rows = users::table
            .select(UserRow::as_select())
            .order(users::id.asc())
            .load::<UserRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "fetch_all"))?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert"))?;
        Ok(User::from(row))
    }
}
