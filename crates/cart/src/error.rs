use snapshot_store::SnapshotStoreError;
use thiserror::Error;

/// Errors raised by cart persistence internals.
///
/// These never escape the engine's public mutation operations; they exist so
/// the load/persist paths can report what went wrong to the log.
#[derive(Debug, Error)]
pub enum CartError {
    /// The snapshot store rejected a read or write.
    #[error("Snapshot store error: {0}")]
    Store(#[from] SnapshotStoreError),

    /// A snapshot could not be serialized or parsed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
