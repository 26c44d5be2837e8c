//! IPN audit log adapters.
//!
//! - `FileIpnLog` - Timestamped text files in an existing directory
//! - `InMemoryIpnLog` - Record collection for tests

mod file_ipn_log;
mod in_memory;

pub use file_ipn_log::{FileIpnLog, LOG_FILE_PREFIX};
pub use in_memory::InMemoryIpnLog;
