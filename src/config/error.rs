//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid gateway timeout (must be 1-300 seconds)")]
    InvalidTimeout,

    #[error("Invalid postback URL: {0}")]
    InvalidPostbackUrl(String),

    #[error("IPN log directory does not exist: {}", .0.display())]
    LogDirectoryMissing(PathBuf),
}
