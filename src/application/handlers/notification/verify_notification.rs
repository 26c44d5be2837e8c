//! VerifyNotificationHandler - Confirms an inbound IPN with the gateway.

use std::sync::Arc;

use crate::domain::notification::{IpnMessage, NotificationOutcome};
use crate::ports::{IpnLog, IpnLogRecord, IpnPostback};

/// Command to verify one inbound notification.
#[derive(Debug, Clone)]
pub struct VerifyNotificationCommand {
    pub message: IpnMessage,
}

impl VerifyNotificationCommand {
    pub fn new(message: IpnMessage) -> Self {
        Self { message }
    }
}

/// Handler for verifying notifications.
///
/// Never fails: transport problems become a `ConnectionFailed` outcome and
/// audit log problems are reported through tracing only.
pub struct VerifyNotificationHandler {
    postback: Arc<dyn IpnPostback>,
    log: Option<Arc<dyn IpnLog>>,
}

impl VerifyNotificationHandler {
    pub fn new(postback: Arc<dyn IpnPostback>) -> Self {
        Self {
            postback,
            log: None,
        }
    }

    /// Records every verification in `log`.
    pub fn with_log(mut self, log: Arc<dyn IpnLog>) -> Self {
        self.log = Some(log);
        self
    }

    pub async fn handle(&self, cmd: VerifyNotificationCommand) -> NotificationOutcome {
        let message = cmd.message;

        // 1. Echo the parameters back with the validation command appended
        let body = message.postback_body();

        // 2. Post back and classify the reply
        let (outcome, record) = match self.postback.post_back(body).await {
            Ok(response) => {
                let outcome = NotificationOutcome::from_response(message.clone(), response.clone());
                let record = if outcome.is_verified() {
                    IpnLogRecord::success(response, message)
                } else {
                    IpnLogRecord::failed(response, message)
                };
                (outcome, record)
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    retryable = err.is_retryable(),
                    "IPN postback failed"
                );
                (
                    NotificationOutcome::connection_failed(message.clone()),
                    IpnLogRecord::no_connection(message),
                )
            }
        };

        tracing::info!(
            status = ?outcome.status,
            error_code = outcome.error_code().unwrap_or("none"),
            txn_id = outcome.message.get("txn_id").unwrap_or(""),
            "IPN verification completed"
        );

        // 3. Audit
        if let Some(log) = &self.log {
            if let Err(err) = log.append(&record).await {
                tracing::warn!(error = %err, "Failed to write IPN log record");
            }
        }

        outcome
    }
}
