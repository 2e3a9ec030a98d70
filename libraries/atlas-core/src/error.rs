/// Core error types for Atlas Directory
use thiserror::Error;

/// Result type alias using `DirectoryError`
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Core error type for Atlas Directory
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up
        entity: String,
        /// Identifier that produced no match
        id: String,
    },

    /// Required configuration is absent
    #[error("{0}")]
    Config(String),

    /// Upstream service returned a non-success status
    #[error("upstream error ({status}): {body}")]
    Upstream {
        /// HTTP status returned by the upstream service
        status: u16,
        /// Raw response body, included for diagnosis
        body: String,
    },

    /// Upstream response had an unexpected shape
    #[error("{0}")]
    Data(String),

    /// Transport-level failure reaching an upstream service
    #[error("network error: {0}")]
    Network(String),

    /// Live subscription was disrupted (client-side only)
    #[error("subscription error: {0}")]
    Subscription(String),

    /// Store-level failure
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl DirectoryError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a data-shape error
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a subscription error
    pub fn subscription(msg: impl Into<String>) -> Self {
        Self::Subscription(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
