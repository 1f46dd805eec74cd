use thiserror::Error;

/// Errors that can occur when interacting with a snapshot store.
#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    /// An I/O error occurred while reading or writing a snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage backend rejected the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for snapshot store operations.
pub type Result<T> = std::result::Result<T, SnapshotStoreError>;
