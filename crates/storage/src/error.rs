//! Storage error taxonomy

/// Result type for log store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by log store implementations.
///
/// `NotFound` is a signal, not a fault: a bounded scan that walks off the
/// populated range sees it and stops. Only the other variants represent
/// genuine backend failures, and those propagate to the caller unmodified.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to open or create the store
    #[error("failed to open log store: {0}")]
    Open(String),

    /// Backend failure while reading a present entry or the index bounds
    #[error("log store read failed: {0}")]
    Read(String),

    /// Backend failure while storing or deleting entries
    #[error("log store write failed: {0}")]
    Write(String),

    /// Failed to flush or release the store's resources
    #[error("failed to close log store: {0}")]
    Close(String),

    /// No entry at the requested index
    #[error("no log entry at index {0}")]
    NotFound(u64),
}

impl StoreError {
    /// Whether this error is the absence signal rather than a backend fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
