//! Checkout error types.
//!
//! Raised synchronously by the payment request builder. Both variants are
//! caller bugs, so neither is retryable.

use thiserror::Error;

/// Errors raised while building or rendering a payment request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// A field value is malformed or outside the accepted domain.
    #[error("Invalid value for '{field}': expected {expected}, got '{actual}'")]
    InvalidArgument {
        field: String,
        expected: &'static str,
        actual: String,
    },

    /// The request was rendered before a required field was set.
    #[error("Required field '{missing}' is not set")]
    InvalidState { missing: &'static str },
}

impl CheckoutError {
    /// Creates an invalid argument error for a field.
    pub fn invalid_argument(
        field: impl Into<String>,
        expected: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        CheckoutError::InvalidArgument {
            field: field.into(),
            expected,
            actual: actual.into(),
        }
    }

    /// Creates an invalid state error for a missing required field.
    pub fn missing(field: &'static str) -> Self {
        CheckoutError::InvalidState { missing: field }
    }

    /// Returns the field name this error refers to.
    pub fn field(&self) -> &str {
        match self {
            CheckoutError::InvalidArgument { field, .. } => field,
            CheckoutError::InvalidState { missing } => missing,
        }
    }

    /// Checkout errors indicate caller bugs and never succeed on retry.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
