use metaspace_list::Location;

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No committed file exists at the location.
    #[error("file does not exist: {0}")]
    NotFound(Location),

    /// Writing into a bucket that was never registered.
    #[error("bucket {0:?} does not exist")]
    BucketNotFound(String),

    /// The write handle was already committed or aborted.
    #[error("write handle for {0} already finalized")]
    AlreadyFinalized(Location),

    /// Configuration could not be parsed.
    #[error("invalid config: {0}")]
    Config(String),

    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A thread panicked while holding the store lock.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
