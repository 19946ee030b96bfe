//! # Chained Form Server
//!
//! Thin wrapper binary for running the form API as a standalone server.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin chained-form-server
//!
//! # Run with specific environment and bind address
//! CHAINED_FORM_ENV=production CHAINED_FORM__WEB__BIND_ADDRESS=0.0.0.0:9000 \
//!     cargo run --bin chained-form-server
//! ```

use anyhow::Context;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use chained_form::config::ConfigManager;
use chained_form::constants::system;
use chained_form::logging;
use chained_form::web::{self, FormWebState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let manager = ConfigManager::load().context("Failed to load configuration")?;
    let config = manager.config();

    logging::init_structured_logging(&config.logging);

    info!("Starting {}", system::SERVICE_NAME);
    info!("   Version: {}", system::VERSION);
    info!(
        "   Build Mode: {}",
        if cfg!(debug_assertions) {
            "Debug"
        } else {
            "Release"
        }
    );
    info!("   Environment: {}", manager.environment());

    let state = Arc::new(FormWebState::new(
        config.web.clone(),
        manager.environment(),
    ));

    let listener = web::bind(&config.web.bind_address).await?;

    info!("   Press Ctrl+C to shutdown gracefully");

    web::serve(listener, state, shutdown_signal()).await?;

    info!("Form API shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
