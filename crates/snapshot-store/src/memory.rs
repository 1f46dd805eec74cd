use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Result, SnapshotStoreError, store::SnapshotStore};

#[derive(Debug, Default)]
struct InMemoryState {
    entries: HashMap<String, String>,
    fail_on_read: bool,
    fail_on_write: bool,
}

/// In-memory snapshot store for testing.
///
/// Provides the same interface as the file-backed implementation, plus
/// fault-injection hooks so callers can exercise their degraded paths.
#[derive(Clone, Default)]
pub struct InMemorySnapshotStore {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemorySnapshotStore {
    /// Creates a new empty in-memory snapshot store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail subsequent read calls.
    pub async fn set_fail_on_read(&self, fail: bool) {
        self.state.write().await.fail_on_read = fail;
    }

    /// Configures the store to fail subsequent write calls.
    pub async fn set_fail_on_write(&self, fail: bool) {
        self.state.write().await.fail_on_write = fail;
    }

    /// Returns the number of stored entries.
    pub async fn entry_count(&self) -> usize {
        self.state.read().await.entries.len()
    }

    /// Returns the raw value stored under `key`, bypassing fault injection.
    pub async fn raw_entry(&self, key: &str) -> Option<String> {
        self.state.read().await.entries.get(key).cloned()
    }

    /// Clears all entries.
    pub async fn clear(&self) {
        self.state.write().await.entries.clear();
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let state = self.state.read().await;
        if state.fail_on_read {
            return Err(SnapshotStoreError::Backend(
                "injected read failure".to_string(),
            ));
        }
        Ok(state.entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if state.fail_on_write {
            return Err(SnapshotStoreError::Backend(
                "injected write failure".to_string(),
            ));
        }
        state.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
