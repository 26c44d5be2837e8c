//! Gateway configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::checkout::GatewayEndpoint;

/// Payment gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Use the sandbox gateway instead of live
    #[serde(default = "default_sandbox")]
    pub sandbox: bool,

    /// Postback connect and read timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Overrides the postback target derived from `sandbox`
    pub postback_url: Option<String>,
}

impl GatewayConfig {
    pub fn endpoint(&self) -> GatewayEndpoint {
        GatewayEndpoint::from_sandbox_flag(self.sandbox)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Where verification postbacks are sent.
    pub fn postback_url(&self) -> String {
        self.postback_url
            .clone()
            .unwrap_or_else(|| self.endpoint().url())
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if let Some(url) = &self.postback_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidPostbackUrl(url.clone()));
            }
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            sandbox: default_sandbox(),
            timeout_secs: default_timeout(),
            postback_url: None,
        }
    }
}

fn default_sandbox() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}
