//! Persistence errors and their mapping to application errors

use std::io;
use std::path::PathBuf;

use application::error::ApplicationError;
use thiserror::Error;

/// Errors raised by the file-backed home store
#[derive(Debug, Error)]
pub enum HomeStoreError {
    /// Reading or writing the store file failed
    #[error("Home store I/O error at {path}: {source}")]
    Io {
        /// File that was accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The home could not be encoded
    #[error("Home store encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl HomeStoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<HomeStoreError> for ApplicationError {
    fn from(err: HomeStoreError) -> Self {
        Self::Internal(err.to_string())
    }
}
