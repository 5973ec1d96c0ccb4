//! Storage-specific error type wrapping IO and JSON errors.

use std::path::PathBuf;

use garagehub_domain::error::GarageError;

/// Errors originating from the JSON file store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The persistence directory could not be created.
    #[error("unable to create persistence directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be read or written.
    #[error("io error on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be encoded.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),
}

impl From<StorageError> for GarageError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
