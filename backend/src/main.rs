//! Backend entry-point: loads settings, prepares the database and serves the
//! users listing plus health checks.

mod server;

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crud_backend::inbound::http::health::HealthState;
use crud_backend::outbound::persistence::DieselUserRepository;
use crud_backend::settings::AppSettings;
use crud_backend::startup::{StartupError, prepare_database, seed_example_users_on_startup};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::from_env().map_err(StartupError::from)?;
    let bind_addr = settings.bind_addr().map_err(StartupError::from)?;
    let pool = prepare_database(&settings).await?;

    seed_example_users_on_startup(
        settings.seed_example_users,
        Arc::new(DieselUserRepository::new(pool.clone())),
    )
    .await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(bind_addr).with_db_pool(pool),
    )?;
    info!(%bind_addr, "listening");
    server.await
}
