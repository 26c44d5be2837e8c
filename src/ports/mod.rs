//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `IpnPostback` - Replays a notification to the gateway for validation
//! - `IpnLog` - Audit trail of verification outcomes

mod ipn_log;
mod ipn_postback;

pub use ipn_log::{IpnLog, IpnLogRecord, LogError, LogVerdict, NO_CONNECTION_MESSAGE};
pub use ipn_postback::{IpnPostback, PostbackError};
