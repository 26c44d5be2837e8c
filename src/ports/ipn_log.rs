//! IpnLog port - Audit trail of notification verifications.
//!
//! Each verification can leave one record holding the verdict, the gateway's
//! raw reply and the full inbound parameter dump. Several verifications may
//! append concurrently; implementations must keep every record intact.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::notification::IpnMessage;

/// Message recorded when the gateway could not be reached.
pub const NO_CONNECTION_MESSAGE: &str = "No Connection";

/// Verdict heading a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogVerdict {
    Success,
    Failed,
}

/// One audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpnLogRecord {
    pub verdict: LogVerdict,
    /// Gateway reply, or [`NO_CONNECTION_MESSAGE`].
    pub detail: String,
    pub message: IpnMessage,
    pub recorded_at: DateTime<Utc>,
}

impl IpnLogRecord {
    /// Record of a verified notification.
    pub fn success(response: impl Into<String>, message: IpnMessage) -> Self {
        Self {
            verdict: LogVerdict::Success,
            detail: response.into(),
            message,
            recorded_at: Utc::now(),
        }
    }

    /// Record of a rejected notification.
    pub fn failed(response: impl Into<String>, message: IpnMessage) -> Self {
        Self {
            verdict: LogVerdict::Failed,
            detail: response.into(),
            message,
            recorded_at: Utc::now(),
        }
    }

    /// Record of a verification that never reached the gateway.
    pub fn no_connection(message: IpnMessage) -> Self {
        Self::failed(NO_CONNECTION_MESSAGE, message)
    }

    /// Renders the record as written to the audit log.
    ///
    /// ```text
    /// SUCCESS\n\n<reply>\r\n\r\nPOST DATA:\r\n\r\n<name = value lines>
    /// FAILED\r\n\r\n<reply>\r\n\r\nPOST DATA:\r\n\r\n<name = value lines>
    /// ```
    pub fn render(&self) -> String {
        let preamble = match self.verdict {
            LogVerdict::Success => "SUCCESS\n\n",
            LogVerdict::Failed => "FAILED\r\n\r\n",
        };
        format!(
            "{preamble}{}\r\n\r\nPOST DATA:\r\n\r\n{}\r\n",
            self.detail,
            self.message.dump()
        )
    }
}

/// Errors from the audit log.
#[derive(Debug, Error)]
pub enum LogError {
    /// The configured log directory does not exist or is not a directory.
    #[error("IPN log directory does not exist: {}", .0.display())]
    DirectoryMissing(PathBuf),

    /// Writing a record failed.
    #[error("IPN log write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for the verification audit log.
#[async_trait]
pub trait IpnLog: Send + Sync {
    /// Appends one complete record.
    async fn append(&self, record: &IpnLogRecord) -> Result<(), LogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> IpnMessage {
        IpnMessage::new(vec![
            ("txn_id".to_string(), "9X".to_string()),
            ("mc_gross".to_string(), "10.00".to_string()),
        ])
    }

    #[test]
    fn ipn_log_is_object_safe() {
        fn _accepts_dyn(_log: &dyn IpnLog) {}
    }

    #[test]
    fn success_record_renders_with_success_preamble() {
        let record = IpnLogRecord::success("VERIFIED", message());
        assert_eq!(
            record.render(),
            "SUCCESS\n\nVERIFIED\r\n\r\nPOST DATA:\r\n\r\ntxn_id = 9X\r\nmc_gross = 10.00\r\n\r\n"
        );
    }

    #[test]
    fn failed_record_renders_with_failed_preamble() {
        let record = IpnLogRecord::failed("INVALID", message());
        assert!(record.render().starts_with("FAILED\r\n\r\nINVALID\r\n\r\nPOST DATA:"));
        assert_eq!(record.verdict, LogVerdict::Failed);
    }

    #[test]
    fn no_connection_record() {
        let record = IpnLogRecord::no_connection(message());
        assert_eq!(record.verdict, LogVerdict::Failed);
        assert_eq!(record.detail, "No Connection");
        assert!(record.render().contains("txn_id = 9X"));
    }

    #[test]
    fn directory_missing_displays_path() {
        let err = LogError::DirectoryMissing(PathBuf::from("/nope/logs"));
        assert_eq!(err.to_string(), "IPN log directory does not exist: /nope/logs");
    }
}
