//! Startup orchestration: database preparation and example seeding.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{SeedOutcome, UserSeeder, example_users};
use crate::outbound::persistence::{DbPool, MigrationError, PoolConfig, PoolError, run_migrations};
use crate::settings::{AppSettings, SettingsError};

/// Errors returned while bringing the service up.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Settings could not be resolved.
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    /// Pending migrations could not be applied.
    #[error("migration error: {0}")]
    Migration(#[from] MigrationError),
    /// The connection pool could not be built.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    /// Example users could not be written.
    #[error("example user seeding error: {0}")]
    Seeding(#[from] UserPersistenceError),
}

impl From<StartupError> for std::io::Error {
    fn from(err: StartupError) -> Self {
        std::io::Error::other(err)
    }
}

/// Apply migrations when enabled, then build the connection pool.
///
/// # Errors
/// Returns [`StartupError`] when the URL is missing, migrations fail or the
/// pool cannot be created.
pub async fn prepare_database(settings: &AppSettings) -> Result<DbPool, StartupError> {
    let database_url = settings.database_url()?;
    if settings.run_migrations {
        run_migrations(&database_url).await?;
    } else {
        info!(reason = "disabled", "migrations skipped");
    }
    Ok(DbPool::new(PoolConfig::new(database_url)).await?)
}

/// Seed the example users through `repository` when `enabled`.
///
/// Returns `None` when seeding is disabled.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use crud_backend::domain::SeedOutcome;
/// use crud_backend::domain::ports::InMemoryUserRepository;
/// use crud_backend::startup::seed_example_users_on_startup;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repository = Arc::new(InMemoryUserRepository::default());
/// let outcome = seed_example_users_on_startup(true, repository)
///     .await
///     .expect("in-memory seeding succeeds");
/// assert_eq!(outcome, Some(SeedOutcome::Applied { inserted: 2 }));
/// # });
/// ```
///
/// # Errors
/// Returns [`StartupError::Seeding`] when the repository fails.
pub async fn seed_example_users_on_startup<R>(
    enabled: bool,
    repository: Arc<R>,
) -> Result<Option<SeedOutcome>, StartupError>
where
    R: UserRepository + ?Sized,
{
    if !enabled {
        info!(reason = "disabled", "example user seeding skipped");
        return Ok(None);
    }
    let outcome = UserSeeder::new(repository).seed(&example_users()).await?;
    Ok(Some(outcome))
}
