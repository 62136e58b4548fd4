//! Error taxonomy for link operations

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by repository, import and vault operations
#[derive(Error, Debug)]
pub enum LinkError {
    /// Missing or invalid url/platform
    #[error("{0}")]
    Validation(String),

    /// No link with the given id
    #[error("Link not found: {0}")]
    NotFound(String),

    /// Import payload is not well-formed JSON
    #[error("Import file is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// Import payload is JSON but lacks the expected structure
    #[error("Invalid file format: {0}")]
    Format(String),

    /// No record survived import validation
    #[error("No valid links found in file")]
    EmptyImport,

    /// The backing store failed
    #[error(transparent)]
    Persistence(#[from] StorageError),
}

impl LinkError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        LinkError::Validation(message.into())
    }
}

pub type LinkResult<T> = Result<T, LinkError>;
