//! # Gun Store
//!
//! Entry point: initializes tracing, loads configuration, connects to
//! PostgreSQL and serves the HTTP API until shutdown.

use anyhow::Result;
use tracing::info;

use gun_store::config::Settings;
use gun_store::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    gun_store::telemetry::init_tracing();

    info!("Starting Gun Store API...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        address = %settings.server_addr(),
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
