//! Error types for listing operations.

use thiserror::Error;

/// Errors that can occur while building or pulling a listing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    /// A location string could not be parsed.
    #[error("invalid location {input:?}: {reason}")]
    InvalidLocation { input: String, reason: String },

    /// The backing source failed while producing entries.
    #[error("listing source failed: {0}")]
    Source(String),
}

/// Convenience type alias for listing operations.
pub type ListResult<T> = std::result::Result<T, ListError>;
