use thiserror::Error;

use crate::config::ConfigurationError;

/// Crate-level failures outside the request/response cycle
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),
}

impl FormError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;
