//! Redirect outcome correlation.
//!
//! The builder tags each merchant URL with `pp_a=<outcome>` so a single landing
//! page can tell which branch the gateway sent the buyer (or the IPN) down.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Query parameter carrying the correlation tag.
pub const CORRELATION_PARAM: &str = "pp_a";

/// Which merchant URL the gateway called back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStatus {
    /// Buyer returned after paying (`return`).
    Success,
    /// Buyer abandoned the checkout (`cancel_return`).
    Cancel,
    /// Server-to-server payment notification (`notify_url`).
    Notify,
}

impl CheckoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::Success => "success",
            CheckoutStatus::Cancel => "cancel",
            CheckoutStatus::Notify => "notify",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "success" => Some(CheckoutStatus::Success),
            "cancel" => Some(CheckoutStatus::Cancel),
            "notify" => Some(CheckoutStatus::Notify),
            _ => None,
        }
    }

    /// Resolves the status from the parameters of the current request.
    ///
    /// Returns `None` when `pp_a` is absent or carries an unknown value. When
    /// the parameter repeats, the last occurrence wins.
    pub fn resolve<'a, I>(params: I) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        params
            .into_iter()
            .filter(|(name, _)| *name == CORRELATION_PARAM)
            .last()
            .and_then(|(_, value)| Self::from_tag(value))
    }

    /// Resolves the status from a raw query string such as `ref=1&pp_a=cancel`.
    ///
    /// A leading `?` is ignored. Malformed query strings resolve to `None`.
    pub fn from_query_string(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).ok()?;
        Self::resolve(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Appends `pp_a=<status>` to a merchant URL.
    ///
    /// Uses `&` when the URL already has a query string, `?` otherwise.
    pub fn correlate_url(&self, url: &str) -> String {
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{url}{separator}{CORRELATION_PARAM}={}", self.as_str())
    }
}

impl fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
