//! GreenLedger API Server
//!
//! Run with: cargo run --bin greenledger-api
//!
//! # Configuration
//!
//! Loaded from config.toml with environment overrides:
//! - `GREENLEDGER_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `GREENLEDGER_API_PORT`: Port to listen on (default: 8091)
//! - `GREENLEDGER_DATA_DIR`: Directory for the ledger file
//! - `GREENLEDGER_LOG_LEVEL`: Log level (default: info)
//! - `GREENLEDGER_LOG_FORMAT`: pretty or json
//! - `RUST_LOG`: Overrides the log filter entirely

use greenledger::api::{serve, AppState};
use greenledger::config::Config;
use greenledger::ledger::{FileStore, GuestLedger};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();

    init_tracing(&config.logging.level, &config.logging.format);

    tracing::info!("Starting GreenLedger API server v{}", env!("CARGO_PKG_VERSION"));

    let ledger_path = config.storage.ledger_path();
    tracing::info!("Guest ledger file: {:?}", ledger_path);

    let ledger = Arc::new(GuestLedger::new(FileStore::new(ledger_path)));
    tracing::info!("Ledger holds {} entries", ledger.len());

    let state = AppState::new(Arc::clone(&ledger), config.api.clone());

    tracing::info!("Starting server on {}:{}", config.api.host, config.api.port);
    serve(state, &config.api).await?;

    tracing::info!("GreenLedger API server stopped");
    Ok(())
}

/// Initialize tracing with the configured level and format
fn init_tracing(level: &str, format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("greenledger={},tower_http=debug", level).into());

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
