//! Shared helpers for backend integration tests that need PostgreSQL.
//!
//! Databases come from the process-wide embedded cluster provided by
//! `pg-embed-setup-unpriv`. Each [`TestDatabase`] is a fresh temporary
//! database with the embedded migrations applied.
//!
//! Cluster bootstrap blocks and drives its own runtime, so fixtures must run
//! outside any Tokio runtime. Async work then goes through
//! [`TestDatabase::runtime`].

use std::time::Duration;

use crud_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig, run_migrations};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Returns true when the `SKIP_TEST_CLUSTER` environment variable is set to a
/// truthy value ("1", "true" or "yes", case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handles embedded cluster setup failures consistently.
///
/// With `SKIP_TEST_CLUSTER` set, prints a skip marker and returns `None`;
/// otherwise panics so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Pins `PG_PASSWORD` so test binaries reusing the same data directory agree
/// on the superuser password.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster singleton spawns any threads.
        unsafe {
            std::env::set_var("PG_PASSWORD", "crud_backend_embedded_test");
        }
    }
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= SHARED_CLUSTER_RETRIES => {
                return Err(format!("shared cluster bootstrap: {error:?}"));
            }
            Err(_) => {
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// A migrated temporary database plus the runtime that owns its pool.
pub struct TestDatabase {
    /// Repository over a small pool bound to [`Self::runtime`].
    pub repository: DieselUserRepository,
    /// Connection string of the temporary database.
    pub url: String,
    /// Runtime for async calls against [`Self::repository`].
    pub runtime: Runtime,
    _database: TemporaryDatabase,
}

impl TestDatabase {
    /// Provision a fresh database on the shared embedded cluster.
    ///
    /// # Errors
    /// Returns a description of the first bootstrap, migration or pool
    /// failure.
    pub fn provision() -> Result<Self, String> {
        assert!(
            tokio::runtime::Handle::try_current().is_err(),
            "provision test databases outside a Tokio runtime"
        );
        let cluster = shared_cluster()?;
        let database = cluster
            .temporary_database(format!("test_{}", uuid::Uuid::new_v4().simple()))
            .map_err(|err| format!("create temporary database: {err:?}"))?;
        let url = database.url().to_string();

        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let repository = runtime.block_on(async {
            run_migrations(&url).await.map_err(|err| err.to_string())?;
            let pool = DbPool::new(PoolConfig::new(&url).with_max_size(2))
                .await
                .map_err(|err| err.to_string())?;
            Ok::<_, String>(DieselUserRepository::new(pool))
        })?;

        Ok(Self {
            repository,
            url,
            runtime,
            _database: database,
        })
    }
}

/// Provision a database, or `None` when the cluster is unavailable and
/// `SKIP_TEST_CLUSTER` allows skipping.
pub fn test_database() -> Option<TestDatabase> {
    match TestDatabase::provision() {
        Ok(database) => Some(database),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
