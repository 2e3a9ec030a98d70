//! Store error type

use atlas_core::DirectoryError;
use thiserror::Error;

/// Errors produced by the realtime store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store handle was closed; no further writes or subscriptions
    #[error("store is closed")]
    Closed,

    /// The path cannot address a value (e.g. writing to the root)
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// A stored value failed to (de)serialize
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl From<StoreError> for DirectoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Serialization(e) => DirectoryError::Serialization(e),
            other => DirectoryError::storage(other.to_string()),
        }
    }
}
