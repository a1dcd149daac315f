// SPDX-License-Identifier: BUSL-1.1
//! # wbd-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the disease dashboard.
//! Binds to `WBD_PORT` (default 8080).

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use wbd_api::state::{AppConfig, AppState, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    let port = config.port;
    let state = AppState::from_config(config).map_err(|e| {
        tracing::error!("Dataset load failed: {e}");
        e
    })?;
    tracing::info!(
        states = state.repository.state_count(),
        districts = state.repository.district_count(),
        diseases = state.repository.disease_count(),
        "dataset loaded"
    );

    let app = wbd_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("WBD API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
