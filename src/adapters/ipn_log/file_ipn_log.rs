//! File-based IPN audit log.
//!
//! Writes records into timestamped text files under an existing directory:
//!
//! ```text
//! {directory}/
//! ├── PayPal_2026.10.19_14h05m09s.txt
//! └── PayPal_2026.10.19_14h07m31s.txt
//! ```
//!
//! Records landing in the same second share a file and are appended in turn.
//! Each record goes out in a single append-mode write while holding the
//! log's write lock, so concurrent verifications never interleave.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::ports::{IpnLog, IpnLogRecord, LogError};

/// File name prefix of every log file.
pub const LOG_FILE_PREFIX: &str = "PayPal_";

/// Appending audit log in a directory.
#[derive(Debug)]
pub struct FileIpnLog {
    directory: PathBuf,
    write_lock: Mutex<()>,
}

impl FileIpnLog {
    /// Opens the log in `directory`.
    ///
    /// The directory is checked here, not on first write, so a bad path is
    /// reported while the application is being configured.
    ///
    /// # Errors
    ///
    /// `DirectoryMissing` if `directory` does not exist or is not a directory.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, LogError> {
        let directory = directory.into();
        if !directory.is_dir() {
            return Err(LogError::DirectoryMissing(directory));
        }
        Ok(Self {
            directory,
            write_lock: Mutex::new(()),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file a record stamped `at` is written to.
    pub fn file_path(&self, at: DateTime<Utc>) -> PathBuf {
        self.directory.join(format!(
            "{LOG_FILE_PREFIX}{}.txt",
            at.format("%Y.%m.%d_%Hh%Mm%Ss")
        ))
    }
}

#[async_trait]
impl IpnLog for FileIpnLog {
    async fn append(&self, record: &IpnLogRecord) -> Result<(), LogError> {
        let path = self.file_path(record.recorded_at);
        let contents = record.render();

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(contents.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "IPN log record written");
        Ok(())
    }
}
