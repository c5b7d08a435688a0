//! Cashflow HTTP server.
//!
//! Reads configuration from the environment, connects to `PostgreSQL` and
//! the organisation web services, and serves the API until interrupted.

use std::sync::Arc;

use cashflow::api::{AppState, SessionKeys, backends::ProductionBackend, router};
use cashflow::config::AppConfig;
use cashflow::telemetry;
use eyre::WrapErr;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    telemetry::init().wrap_err("install tracing subscriber")?;
    let config = AppConfig::from_env().wrap_err("read configuration")?;

    let adapters = ProductionBackend::connect(&config).wrap_err("connect adapters")?;
    let state = AppState::new(
        adapters,
        SessionKeys::from_secret(&config.secret_key),
        &config.login_frontend_url,
    );

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .wrap_err_with(|| format!("bind {}", config.bind_addr))?;
    info!(address = %config.bind_addr, "serving cashflow");

    axum::serve(listener, router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("serve HTTP")?;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
