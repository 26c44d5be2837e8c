//! reqwest implementation of the IPN postback.
//!
//! Sends the encoded notification to the gateway's validation endpoint as a
//! single HTTP/1.1 POST:
//!
//! ```text
//! POST /cgi-bin/webscr HTTP/1.1
//! host: www.paypal.com
//! content-type: application/x-www-form-urlencoded
//! content-length: <exact body length>
//! connection: close
//!
//! <received fields>&cmd=_notify-validate
//! ```
//!
//! Connecting and the full exchange are bounded by the configured timeout.
//! The response is read to the end before returning, and dropping the response
//! releases the connection on every path.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONNECTION, CONTENT_TYPE};

use crate::domain::checkout::GatewayEndpoint;
use crate::ports::{IpnPostback, PostbackError};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Default bound on connecting and on the whole exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// IPN postback over reqwest.
pub struct ReqwestPostback {
    url: String,
    http_client: reqwest::Client,
}

impl ReqwestPostback {
    /// Creates a postback client for an arbitrary validation URL.
    ///
    /// # Errors
    ///
    /// `Client` if the TLS backend cannot be initialised.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PostbackError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| PostbackError::Client(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            http_client,
        })
    }

    /// Creates a postback client for the gateway the checkout form posts to.
    ///
    /// # Errors
    ///
    /// `Client` if the TLS backend cannot be initialised.
    pub fn for_endpoint(endpoint: GatewayEndpoint, timeout: Duration) -> Result<Self, PostbackError> {
        Self::new(endpoint.url(), timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn classify_error(err: reqwest::Error) -> PostbackError {
    if err.is_timeout() {
        PostbackError::Timeout(err.to_string())
    } else if err.is_connect() {
        PostbackError::Connect(err.to_string())
    } else {
        PostbackError::Transport(err.to_string())
    }
}

#[async_trait]
impl IpnPostback for ReqwestPostback {
    async fn post_back(&self, body: String) -> Result<String, PostbackError> {
        tracing::debug!(url = %self.url, bytes = body.len(), "Posting IPN back to gateway");

        let response = self
            .http_client
            .post(&self.url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(CONNECTION, "close")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                let err = classify_error(e);
                tracing::warn!(url = %self.url, error = %err, "IPN postback failed");
                err
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            let err = classify_error(e);
            tracing::warn!(url = %self.url, error = %err, "Reading IPN postback reply failed");
            err
        })?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Gateway answered IPN postback with non-success status");
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_endpoint_targets_gateway_url() {
        let live = ReqwestPostback::for_endpoint(GatewayEndpoint::Live, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(live.url(), "https://www.paypal.com/cgi-bin/webscr");

        let sandbox =
            ReqwestPostback::for_endpoint(GatewayEndpoint::Sandbox, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(sandbox.url(), "https://www.sandbox.paypal.com/cgi-bin/webscr");
    }

    #[test]
    fn default_timeout_is_thirty_seconds() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn unparseable_url_is_a_transport_error() {
        let postback = ReqwestPostback::new("not a url", DEFAULT_TIMEOUT).unwrap();
        let result = postback.post_back("cmd=_notify-validate".to_string()).await;
        assert!(matches!(result, Err(PostbackError::Transport(_))));
    }
}
