//! Backend entry-point: loads settings, prepares the database and serves the
//! habits API.

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use habit_buddy::inbound::http::health::HealthState;
use habit_buddy::inbound::http::token_config::{
    BuildMode, TokenSecretSource, token_verifier_from_source,
};
use habit_buddy::outbound::persistence::{DbPool, PoolConfig, run_pending_async};
use habit_buddy::settings::AppSettings;

mod server;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let config = build_server_config(&settings).await?;

    info!(bind_addr = %config.bind_addr(), "starting habits server");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

async fn build_server_config(settings: &AppSettings) -> io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let database_url = settings.database_url().map_err(io::Error::other)?;
    let max_size = settings.db_max_connections().map_err(io::Error::other)?;

    let verifier = token_verifier_from_source(
        TokenSecretSource {
            secret: settings.jwt_secret(),
            secret_file: settings.jwt_secret_file(),
        },
        BuildMode::from_debug_assertions(),
    )
    .map_err(io::Error::other)?;

    if settings.run_migrations {
        let applied = run_pending_async(database_url.to_owned())
            .await
            .map_err(io::Error::other)?;
        info!(applied = applied.len(), "database migrations complete");
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
        .await
        .map_err(io::Error::other)?;

    Ok(ServerConfig::new(bind_addr, verifier).with_db_pool(pool))
}
