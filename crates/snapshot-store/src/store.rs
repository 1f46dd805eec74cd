use async_trait::async_trait;

use crate::Result;

/// Core trait for snapshot store implementations.
///
/// A snapshot store holds one serialized value per logical key and is
/// overwritten wholesale on every write. Implementations must be thread-safe
/// (Send + Sync).
///
/// Callers must tolerate `Ok(None)` from `read` (the key has never been
/// written) and should treat content they cannot parse as absent.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Reads the snapshot stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been written under that key.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous snapshot.
    async fn write(&self, key: &str, value: &str) -> Result<()>;
}
