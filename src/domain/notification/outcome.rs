//! Verification outcome of a payment notification.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::message::IpnMessage;

/// Token whose presence in the gateway's reply marks a notification as genuine.
pub const VERIFIED_TOKEN: &str = "VERIFIED";

/// Result of replaying a notification to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// The gateway confirmed the notification.
    Verified,
    /// The gateway answered but did not confirm the notification.
    Unverified,
    /// The gateway could not be reached or did not answer in time.
    ConnectionFailed,
}

/// Machine-readable reason attached to a non-verified outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpnErrorCode {
    /// No connection to the gateway. Transient; safe to retry with backoff.
    #[serde(rename = "no_connection")]
    NoConnection,
    /// The gateway rejected the replayed notification. Treat as a possible forgery.
    #[serde(rename = "ipn_validation_failed")]
    ValidationFailed,
}

impl IpnErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpnErrorCode::NoConnection => "no_connection",
            IpnErrorCode::ValidationFailed => "ipn_validation_failed",
        }
    }

    /// Only connection failures are worth retrying automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, IpnErrorCode::NoConnection)
    }
}

impl fmt::Display for IpnErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies the gateway's reply.
///
/// Any occurrence of `VERIFIED`, in any letter case, counts as verified.
pub fn classify_response(response: &str) -> VerificationStatus {
    if response.to_ascii_uppercase().contains(VERIFIED_TOKEN) {
        VerificationStatus::Verified
    } else {
        VerificationStatus::Unverified
    }
}

/// Outcome of verifying one notification.
///
/// Carries the inbound parameters so the host can audit or fulfil from them.
/// Only act on the message when [`NotificationOutcome::is_verified`] is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOutcome {
    pub status: VerificationStatus,
    pub error: Option<IpnErrorCode>,
    /// Raw gateway reply, absent when no connection was made.
    pub response: Option<String>,
    pub message: IpnMessage,
}

impl NotificationOutcome {
    pub fn verified(message: IpnMessage, response: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Verified,
            error: None,
            response: Some(response.into()),
            message,
        }
    }

    pub fn unverified(message: IpnMessage, response: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Unverified,
            error: Some(IpnErrorCode::ValidationFailed),
            response: Some(response.into()),
            message,
        }
    }

    pub fn connection_failed(message: IpnMessage) -> Self {
        Self {
            status: VerificationStatus::ConnectionFailed,
            error: Some(IpnErrorCode::NoConnection),
            response: None,
            message,
        }
    }

    /// Builds the outcome for a reply that was received in full.
    pub fn from_response(message: IpnMessage, response: impl Into<String>) -> Self {
        let response = response.into();
        match classify_response(&response) {
            VerificationStatus::Verified => Self::verified(message, response),
            _ => Self::unverified(message, response),
        }
    }

    pub fn is_verified(&self) -> bool {
        self.status == VerificationStatus::Verified
    }

    /// `no_connection`, `ipn_validation_failed`, or `None` when verified.
    pub fn error_code(&self) -> Option<&'static str> {
        self.error.map(|code| code.as_str())
    }

    pub fn is_retryable(&self) -> bool {
        self.error.is_some_and(|code| code.is_retryable())
    }
}
