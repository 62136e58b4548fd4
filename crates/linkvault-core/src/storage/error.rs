//! Errors raised by the link stores
//!
//! `JsonFileStore` turns every `io::Error` into one of these with the
//! offending path attached. The CLI prints `recovery_suggestion` under the
//! error message.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reading, writing or decoding `storage.json`
#[derive(Error, Debug)]
pub enum StorageError {
    /// The data directory could not be created before the first write
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The store file or its directory is not accessible
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The device or quota ran out of space
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the store file failed
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the temp file failed
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Store file exists but does not hold a JSON object
    #[error("Store at '{path}' is corrupted: {details}. A backup has been created at '{backup_path}'.")]
    CorruptDocument {
        path: PathBuf,
        backup_path: PathBuf,
        details: String,
    },

    /// The value under `key` is not valid link JSON
    #[error("Stored value for key '{key}' is not valid link JSON: {source}")]
    Encoding {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The temp file could not be renamed over the store file
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Classify an I/O failure on `path`
    ///
    /// Anything that is not a permission or space problem is reported as a
    /// write error.
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ if is_disk_full_error(&error) => StorageError::DiskFull {
                path,
                source: error,
            },
            _ => StorageError::WriteError {
                path,
                source: error,
            },
        }
    }

    /// True when fixing the environment and re-running the command can succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StorageError::DiskFull { .. }
                | StorageError::PermissionDenied { .. }
                | StorageError::CorruptDocument { .. }
        )
    }

    /// A hint shown after the error message, if there is one
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("Free up disk space and try again."),
            StorageError::PermissionDenied { .. } => {
                Some("Check file and directory permissions of the data directory.")
            }
            StorageError::CorruptDocument { .. } => Some(
                "The corrupted store was backed up. Restore links from an export with `linkvault import`, or start fresh.",
            ),
            StorageError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            _ => None,
        }
    }
}

/// `ErrorKind::StorageFull` is unstable, so match on the message
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result of a store operation
pub type StorageResult<T> = Result<T, StorageError>;
