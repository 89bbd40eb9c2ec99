//! Backend entry-point: loads settings, prepares storage and serves the
//! REST API with its OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recipe_backend::inbound::http::health::HealthState;
use recipe_backend::outbound::persistence::{DbPool, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

/// Apply migrations off the async runtime.
async fn migrate(database_url: String) -> std::io::Result<()> {
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(std::io::Error::other)?;
    info!(applied, "database migrations up to date");
    Ok(())
}

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

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let mut config = ServerConfig::new(settings.bind_addr()?);

    if let Some(url) = settings.database_url() {
        if settings.run_migrations {
            migrate(url.clone()).await?;
        }
        let pool = DbPool::new(settings.pool_config(url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(host = settings.host(), port = settings.port(), "starting server");
    create_server(health_state, config)?.await
}
