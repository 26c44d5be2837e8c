//! Scripted IPN postback for tests.
//!
//! Answers every call with a fixed reply or error and records each body it
//! was sent, so tests can assert on the exact postback payload.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{IpnPostback, PostbackError};

#[derive(Clone)]
enum Reply {
    Respond(String),
    Fail(PostbackError),
}

struct MockState {
    reply: Reply,
    bodies: Vec<String>,
}

/// Mock gateway validation endpoint.
///
/// # Example
///
/// ```ignore
/// let gateway = MockPostback::responding("VERIFIED");
/// let handler = VerifyNotificationHandler::new(Arc::new(gateway.clone()));
/// handler.handle(command).await;
/// assert_eq!(gateway.call_count(), 1);
/// ```
#[derive(Clone)]
pub struct MockPostback {
    inner: Arc<Mutex<MockState>>,
}

impl MockPostback {
    fn with_reply(reply: Reply) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState {
                reply,
                bodies: Vec::new(),
            })),
        }
    }

    /// Answers every postback with `body`.
    pub fn responding(body: impl Into<String>) -> Self {
        Self::with_reply(Reply::Respond(body.into()))
    }

    /// Answers `VERIFIED`.
    pub fn verifying() -> Self {
        Self::responding("VERIFIED")
    }

    /// Answers `INVALID`.
    pub fn rejecting() -> Self {
        Self::responding("INVALID")
    }

    /// Fails every postback with `error`.
    pub fn failing(error: PostbackError) -> Self {
        Self::with_reply(Reply::Fail(error))
    }

    /// Fails every postback as if the connection was refused.
    pub fn refusing() -> Self {
        Self::failing(PostbackError::Connect("connection refused".to_string()))
    }

    /// Bodies received so far, oldest first.
    pub fn bodies(&self) -> Vec<String> {
        self.lock().bodies.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().bodies.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked mid-call.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl IpnPostback for MockPostback {
    async fn post_back(&self, body: String) -> Result<String, PostbackError> {
        let mut state = self.lock();
        state.bodies.push(body);
        match &state.reply {
            Reply::Respond(text) => Ok(text.clone()),
            Reply::Fail(err) => Err(err.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responding_mock_returns_body_and_records_call() {
        let mock = MockPostback::verifying();

        let reply = mock.post_back("a=1&cmd=_notify-validate".to_string()).await;

        assert_eq!(reply.unwrap(), "VERIFIED");
        assert_eq!(mock.bodies(), vec!["a=1&cmd=_notify-validate".to_string()]);
    }

    #[tokio::test]
    async fn refusing_mock_returns_connect_error() {
        let mock = MockPostback::refusing();

        let reply = mock.post_back(String::new()).await;

        assert!(matches!(reply, Err(PostbackError::Connect(_))));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn clones_share_call_log() {
        let mock = MockPostback::rejecting();
        let clone = mock.clone();

        clone.post_back("x=1".to_string()).await.unwrap();

        assert_eq!(mock.call_count(), 1);
    }
}
