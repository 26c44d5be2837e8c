//! IpnPostback port - Replays a notification to the gateway.
//!
//! Implementations POST the already-encoded body to the gateway's validation
//! endpoint over TLS, read the whole reply and release the connection before
//! returning, on success and failure alike. They perform exactly one attempt;
//! retrying is the caller's decision.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the postback round-trip.
///
/// Every variant means no complete reply was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostbackError {
    /// The connection could not be established.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Connecting or reading exceeded the configured timeout.
    #[error("Timed out: {0}")]
    Timeout(String),

    /// The connection broke while sending or reading.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The HTTP client could not be constructed.
    #[error("Client setup failed: {0}")]
    Client(String),
}

impl PostbackError {
    /// Connection and timeout failures are transient.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, PostbackError::Client(_))
    }
}

/// Port for the gateway's notification validation endpoint.
#[async_trait]
pub trait IpnPostback: Send + Sync {
    /// Posts `body` (form-urlencoded, ending in `cmd=_notify-validate`) and
    /// returns the complete reply body as text.
    async fn post_back(&self, body: String) -> Result<String, PostbackError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipn_postback_is_object_safe() {
        fn _accepts_dyn(_postback: &dyn IpnPostback) {}
    }

    #[test]
    fn network_errors_are_retryable() {
        assert!(PostbackError::Connect("refused".into()).is_retryable());
        assert!(PostbackError::Timeout("30s".into()).is_retryable());
        assert!(PostbackError::Transport("reset".into()).is_retryable());
        assert!(!PostbackError::Client("bad tls".into()).is_retryable());
    }

    #[test]
    fn error_display() {
        let err = PostbackError::Connect("connection refused".into());
        assert_eq!(err.to_string(), "Connection failed: connection refused");
    }
}
