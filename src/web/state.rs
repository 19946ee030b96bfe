//! # Web API Application State
//!
//! Immutable state shared by every request: the web configuration and the
//! (stateless) form validator. Built once at startup and handed to the router.

use tracing::info;

use crate::config::WebConfig;
use crate::validation::FormValidator;

/// Shared state for the form web application
#[derive(Debug, Clone)]
pub struct FormWebState {
    /// Web API configuration
    pub config: WebConfig,

    /// Chain validator applied to every decoded submission
    pub validator: FormValidator,

    /// Deployment environment name
    pub environment: String,
}

impl FormWebState {
    pub fn new(config: WebConfig, environment: impl Into<String>) -> Self {
        let environment = environment.into();

        info!(
            bind_address = %config.bind_address,
            environment = %environment,
            "Initializing form web state"
        );

        Self {
            config,
            validator: FormValidator::new(),
            environment,
        }
    }
}
