//! Burn Rate Predictor - Main Entry Point
//!
//! Loads the ONNX regressor once, then serves the prediction form over HTTP.

use anyhow::{Context, Result};
use burn_rate_predictor::{
    config::AppConfig,
    handler::PredictionService,
    logging,
    models::inference::InferenceEngine,
    server::{self, AppState, FormTemplate},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    logging::init(&config.logging)?;

    info!("Starting Burn Rate Predictor");
    info!(
        "Risk levels: medium>={:.2}, elevated>={:.2}, high>={:.2}",
        config.risk_levels.medium, config.risk_levels.elevated, config.risk_levels.high
    );

    // A missing or corrupt model is fatal
    let engine = InferenceEngine::new(&config.model).context("Failed to load burn rate model")?;

    let service = PredictionService::new(Arc::new(engine), config.risk_levels.clone());
    let template = FormTemplate::new().context("Failed to compile form template")?;
    let state = AppState::new(service, template)
        .with_strict_status_codes(config.server.strict_status_codes);
    let app = server::router(state);

    let bind_addr = config.server.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    info!(address = %bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
