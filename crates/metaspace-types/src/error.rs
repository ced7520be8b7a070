use thiserror::Error;

/// Errors produced while constructing, verifying or decoding identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// A required field is missing or out of range.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid segment key {key:?}: {reason}")]
    InvalidSegmentKey { key: String, reason: String },

    #[error("invalid bucket prefix {prefix:?}: {reason}")]
    InvalidBucketPrefix { prefix: String, reason: String },

    #[error("invalid segment index: {0}")]
    InvalidSegmentIndex(i64),

    #[error("invalid object status: {0:?}")]
    InvalidStatus(String),

    #[error("invalid uuid {input:?}: {reason}")]
    InvalidUuid { input: String, reason: String },

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Result alias for type operations.
pub type TypeResult<T> = Result<T, TypeError>;
