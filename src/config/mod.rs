//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PAYPAL_STANDARD` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use paypal_standard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Posting back to {}", config.gateway.postback_url());
//! ```

mod error;
mod gateway;
mod logging;

pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a sandbox
/// setup with auditing disabled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Gateway selection and postback transport
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Diagnostics and IPN audit log
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PAYPAL_STANDARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PAYPAL_STANDARD__GATEWAY__SANDBOX=false` -> `gateway.sandbox = false`
    /// - `PAYPAL_STANDARD__LOGGING__IPN_LOG_DIR=/var/log/ipn` -> `logging.ipn_log_dir = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAYPAL_STANDARD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an out-of-range timeout, a non-HTTP
    /// postback URL, or an IPN log directory that does not exist.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.gateway.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
