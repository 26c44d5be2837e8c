//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `paypal` - Gateway postback clients (reqwest, mock)
//! - `ipn_log` - Verification audit logs (file, in-memory)

pub mod ipn_log;
pub mod paypal;

pub use ipn_log::{FileIpnLog, InMemoryIpnLog};
pub use paypal::{MockPostback, ReqwestPostback};
