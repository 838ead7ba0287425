// Intake API Entry Point
// Validates, sanitizes and analyzes submitted articles, then hands them off

use anyhow::{Context, Result};
use intake_core::{config::AppConfig, server, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    telemetry::init_tracing(env!("CARGO_PKG_NAME"), config.log_format)
        .context("Failed to initialize logging")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        analysis_mode = ?config.analysis_mode,
        webhook = config.webhook_url.is_some(),
        "Starting Intake API"
    );

    server::serve(&config).await.context("Server error")?;

    Ok(())
}
