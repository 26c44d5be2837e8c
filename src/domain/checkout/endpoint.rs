//! Gateway endpoint selection.

use serde::{Deserialize, Serialize};

const SANDBOX_HOST: &str = "www.sandbox.paypal.com";
const LIVE_HOST: &str = "www.paypal.com";

/// Path shared by the checkout form and the IPN postback.
pub const GATEWAY_PATH: &str = "/cgi-bin/webscr";

/// Gateway the checkout form posts to and notifications are verified against.
///
/// Chosen once at construction. Sandbox and live share the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayEndpoint {
    #[default]
    Sandbox,
    Live,
}

impl GatewayEndpoint {
    /// Selects the sandbox when `sandbox` is true, live otherwise.
    pub fn from_sandbox_flag(sandbox: bool) -> Self {
        if sandbox {
            GatewayEndpoint::Sandbox
        } else {
            GatewayEndpoint::Live
        }
    }

    /// Host name of the gateway.
    pub fn host(&self) -> &'static str {
        match self {
            GatewayEndpoint::Sandbox => SANDBOX_HOST,
            GatewayEndpoint::Live => LIVE_HOST,
        }
    }

    /// Path of the gateway script.
    pub fn path(&self) -> &'static str {
        GATEWAY_PATH
    }

    /// Full HTTPS URL, used as the form action and the postback target.
    pub fn url(&self) -> String {
        format!("https://{}{}", self.host(), self.path())
    }

    pub fn is_sandbox(&self) -> bool {
        matches!(self, GatewayEndpoint::Sandbox)
    }
}
