//! Configuration Loader
//!
//! Environment-aware configuration loading. Discovers the base and
//! per-environment TOML files, layers environment variable overrides on top
//! and validates the merged result.

use config::{Config, Environment, File};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::error::{ConfigResult, ConfigurationError};
use super::FormServiceConfig;

/// Base name of the configuration files inside the config directory
const CONFIG_FILE_STEM: &str = "chained-form";

/// Prefix for environment variable overrides, e.g. `CHAINED_FORM__WEB__BIND_ADDRESS`
const ENV_PREFIX: &str = "CHAINED_FORM";
const ENV_SEPARATOR: &str = "__";

/// Loaded, validated configuration plus where it came from
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: FormServiceConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_with_overrides(config_dir, environment, None)
    }

    /// Load configuration with an explicit set of environment overrides
    ///
    /// `overrides` replaces the process environment as the variable source,
    /// which keeps tests independent of the global environment.
    pub fn load_with_overrides(
        config_dir: Option<PathBuf>,
        environment: &str,
        overrides: Option<config::Map<String, String>>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::load_and_merge_config(&config_directory, environment, overrides)?;
        config.validate()?;

        info!(
            environment = environment,
            bind_address = %config.web.bind_address,
            request_timeout_ms = config.web.request_timeout_ms,
            cors_origins = ?config.web.cors.allowed_origins,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &FormServiceConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Current environment from `CHAINED_FORM_ENV`, then `APP_ENV`, default `development`
    pub fn detect_environment() -> String {
        env::var("CHAINED_FORM_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
    }

    fn default_config_directory() -> PathBuf {
        env::var("CHAINED_FORM_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"))
    }

    fn load_and_merge_config(
        config_directory: &Path,
        environment: &str,
        overrides: Option<config::Map<String, String>>,
    ) -> ConfigResult<FormServiceConfig> {
        let defaults = Config::try_from(&FormServiceConfig::default())
            .map_err(|e| ConfigurationError::load_error(environment, e))?;

        let base_file = config_directory.join(format!("{CONFIG_FILE_STEM}.toml"));
        let env_file = config_directory.join(format!("{CONFIG_FILE_STEM}.{environment}.toml"));

        debug!(
            base = %base_file.display(),
            base_exists = base_file.exists(),
            environment_file = %env_file.display(),
            environment_file_exists = env_file.exists(),
            "Configuration file discovery"
        );

        let env_source = Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .list_separator(",")
            .with_list_parse_key("web.cors.allowed_origins")
            .try_parsing(true)
            .source(overrides);

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(base_file).required(false))
            .add_source(File::from(env_file).required(false))
            .add_source(env_source)
            .build()
            .and_then(|merged| merged.try_deserialize::<FormServiceConfig>())
            .map_err(|e| ConfigurationError::load_error(environment, e))
    }
}
