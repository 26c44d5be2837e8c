//! In-memory IPN audit log for tests and embedding hosts.

use std::io;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{IpnLog, IpnLogRecord, LogError};

/// Keeps records in memory. Can be told to fail every write.
#[derive(Debug, Default)]
pub struct InMemoryIpnLog {
    records: Mutex<Vec<IpnLogRecord>>,
    fail_writes: bool,
}

impl InMemoryIpnLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log whose every append fails with an I/O error.
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_writes: true,
        }
    }

    /// Records appended so far, oldest first.
    pub fn records(&self) -> Vec<IpnLogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl IpnLog for InMemoryIpnLog {
    async fn append(&self, record: &IpnLogRecord) -> Result<(), LogError> {
        if self.fail_writes {
            return Err(LogError::Io(io::Error::new(
                io::ErrorKind::Other,
                "in-memory log configured to fail",
            )));
        }
        self.records
            .lock()
            .map_err(|_| LogError::Io(io::Error::new(io::ErrorKind::Other, "log lock poisoned")))?
            .push(record.clone());
        Ok(())
    }
}
