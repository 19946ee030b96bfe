//! # Structured Logging Module
//!
//! Environment-aware structured logging for the form service. Console output
//! is either human-readable or JSON lines, selected by configuration.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{ConfigManager, LogFormat, LoggingConfig};
use crate::models::Mode;
use crate::validation::AcceptedSubmission;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
///
/// `RUST_LOG` takes precedence over the configured level. Safe to call more
/// than once; only the first call installs a subscriber.
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = config
            .level
            .clone()
            .unwrap_or_else(|| get_log_level(&environment));

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

        let console_layer = match config.format {
            LogFormat::Json => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed(),
            LogFormat::Pretty => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed(),
        };

        // A subscriber may already be installed by an embedding process or a test harness
        if tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %environment,
            level = %log_level,
            format = ?config.format,
            "STRUCTURED LOGGING: Initialized"
        );
    });
}

fn get_environment() -> String {
    ConfigManager::detect_environment()
}

/// Default log level for an environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "test" => "debug".to_string(),
        "development" => "debug".to_string(),
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log the normalized record of an accepted submission
pub fn log_submission_accepted(accepted: &AcceptedSubmission) {
    let form_data = serde_json::to_string(&accepted.form_data)
        .unwrap_or_else(|_| "[serialization error]".to_string());

    tracing::info!(
        submission_id = %accepted.id,
        timestamp = %accepted.received_at.to_rfc3339(),
        mode = ?accepted.form_data.mode,
        form_data = %form_data,
        "FORM_SUBMISSION_ACCEPTED"
    );
}

/// Log a submission that failed chain validation
pub fn log_submission_rejected(mode: Mode, errors: &[String]) {
    tracing::debug!(
        mode = ?mode,
        error_count = errors.len(),
        errors = ?errors,
        timestamp = %Utc::now().to_rfc3339(),
        "FORM_SUBMISSION_REJECTED"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}
