//! # Service Configuration
//!
//! Layered configuration for the chained form service. Values come from, in
//! increasing precedence:
//!
//! 1. built-in defaults ([`FormServiceConfig::default`])
//! 2. `config/chained-form.toml`
//! 3. `config/chained-form.<environment>.toml`
//! 4. environment variables such as `CHAINED_FORM__WEB__BIND_ADDRESS`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chained_form::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let bind_address = &manager.config().web.bind_address;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use crate::constants::system;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FormServiceConfig {
    /// HTTP server settings
    pub web: WebConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WebConfig {
    /// Address to bind the web server to
    pub bind_address: String,

    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,

    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: system::DEFAULT_BIND_ADDRESS.to_string(),
            request_timeout_ms: system::DEFAULT_REQUEST_TIMEOUT_MS,
            cors: CorsConfig::default(),
        }
    }
}

impl WebConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Cross-origin settings for the browser frontend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API
    pub allowed_origins: Vec<String>,

    /// Whether cookies and auth headers may accompany cross-origin requests
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: system::DEFAULT_CORS_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
            allow_credentials: true,
        }
    }
}

/// Console log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Log output configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive; defaults by environment when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    pub format: LogFormat,
}

impl FormServiceConfig {
    /// Validate configuration values that serde cannot check on its own
    pub fn validate(&self) -> ConfigResult<()> {
        if self.web.bind_address.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "bind_address",
                "web",
            ));
        }

        self.web
            .bind_address
            .parse::<SocketAddr>()
            .map_err(|e| {
                ConfigurationError::invalid_value(
                    "web.bind_address",
                    &self.web.bind_address,
                    format!("must be a socket address like 0.0.0.0:8001 ({e})"),
                )
            })?;

        if self.web.request_timeout_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "web.request_timeout_ms",
                "0",
                "request timeout must be greater than 0",
            ));
        }

        self.web.cors.validate()
    }
}

impl CorsConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        for origin in &self.allowed_origins {
            if origin == "*" && self.allow_credentials {
                return Err(ConfigurationError::invalid_value(
                    "web.cors.allowed_origins",
                    origin,
                    "wildcard origin cannot be combined with allow_credentials",
                ));
            }
            HeaderValue::from_str(origin).map_err(|_| {
                ConfigurationError::invalid_value(
                    "web.cors.allowed_origins",
                    origin,
                    "origin must be a valid header value",
                )
            })?;
        }
        Ok(())
    }

    /// Parsed origins; invalid entries are rejected earlier by [`CorsConfig::validate`]
    pub fn origin_header_values(&self) -> Vec<HeaderValue> {
        self.allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect()
    }
}
