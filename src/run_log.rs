//! Run log module
//!
//! Every externally visible action of a run (the pick, the search summary,
//! the command exchange, errors) is appended to a plain-text log file
//! through this single sink.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the log file inside the log directory.
pub const LOG_FILE_NAME: &str = "episode_roulette.log";

/// Errors that can occur while writing to the run log
#[derive(Debug, Error)]
pub enum RunLogError {
    /// Failed to open or create the log file
    #[error("Failed to open log file {path}: {source}")]
    OpenFailed { path: PathBuf, source: io::Error },

    /// Failed to append to the log file
    #[error("Failed to write to log file {path}: {source}")]
    WriteFailed { path: PathBuf, source: io::Error },
}

/// Append-only, timestamped log sink.
///
/// The file is opened (created if absent), appended to, and closed on every
/// single call; no handle is kept across writes, so an abrupt exit never
/// leaves one dangling.
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    /// Creates a log handle writing to `episode_roulette.log` inside the
    /// given directory. Nothing is touched until the first append.
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            path: directory.as_ref().join(LOG_FILE_NAME),
        }
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one message as a line prefixed with the local time.
    ///
    /// Multi-line messages keep their inner line breaks; only the first
    /// line carries the timestamp.
    pub fn append(&self, message: &str) -> Result<(), RunLogError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| RunLogError::OpenFailed {
                path: self.path.clone(),
                source,
            })?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "{timestamp} {message}").map_err(|source| RunLogError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }
}
