//! Error types for the live directory client.

use thiserror::Error;

/// Errors from the realtime feed.
#[derive(Error, Debug)]
pub enum LiveError {
    /// The live event stream was disrupted.
    ///
    /// Not recovered automatically: the caller decides whether to
    /// re-establish the window from scratch.
    #[error("subscription error: {0}")]
    Subscription(String),

    /// The store rejected an operation
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<atlas_store::StoreError> for LiveError {
    fn from(err: atlas_store::StoreError) -> Self {
        LiveError::Storage(err.to_string())
    }
}

/// Errors from the directory HTTP client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed in transport
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message, decoded from the `{"error"}` body when possible
        message: String,
    },

    /// Invalid base URL
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a server response
    #[error("failed to parse response: {0}")]
    Parse(String),
}
