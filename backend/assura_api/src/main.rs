//! Assura demo backend entry point.
//!
//! Builds the in-memory marketplace simulation, seeds it the way a first
//! page view would, and serves it over a small Axum REST API.

mod api;
mod config;
mod errors;
mod state;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;

    let state = Arc::new(AppState::from_config(&config).map_err(|e| anyhow::anyhow!("{e}"))?);
    if config.seed_on_start {
        state.on_load().await;
    }

    let app = api::router(state);

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!(seed = ?config.sim_seed, "API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutting down");
}
