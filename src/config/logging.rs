//! Logging configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Diagnostics and IPN audit log configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Rust log filter directive, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit diagnostics as JSON lines
    #[serde(default)]
    pub json: bool,

    /// Directory for IPN audit files; auditing is off when unset
    pub ipn_log_dir: Option<PathBuf>,
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.ipn_log_dir {
            Some(dir) if !dir.is_dir() => Err(ValidationError::LogDirectoryMissing(dir.clone())),
            _ => Ok(()),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            ipn_log_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info,paypal_standard=debug".to_string()
}
