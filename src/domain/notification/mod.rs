//! Payment notification (IPN) domain.
//!
//! Holds the inbound parameters, the postback encoding and the rules for
//! classifying the gateway's answer. The network round-trip itself lives
//! behind the `IpnPostback` port.

mod message;
mod outcome;

pub use message::{IpnMessage, PAYMENT_STATUS_FIELD, VALIDATE_COMMAND};
pub use outcome::{
    classify_response, IpnErrorCode, NotificationOutcome, VerificationStatus, VERIFIED_TOKEN,
};
