use std::path::PathBuf;

use async_trait::async_trait;

use crate::{Result, SnapshotStoreError, store::SnapshotStore};

/// File-backed snapshot store.
///
/// The durable analog of browser local storage: each logical key maps to one
/// file under a root directory. Writes go through a temp file and rename so a
/// crashed write never leaves a truncated snapshot behind.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    root: PathBuf,
}

impl FileSnapshotStore {
    /// Creates a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(SnapshotStoreError::Backend(format!(
                "invalid snapshot key: {key:?}"
            )));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SnapshotStoreError::Io(e)),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root).await?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        tracing::debug!(key, bytes = value.len(), "snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_missing_key_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path());
        assert!(store.read("cart").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path());

        store.write("cart", r#"[{"id":1}]"#).await.unwrap();
        assert_eq!(
            store.read("cart").await.unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path());

        store.write("cart", "old").await.unwrap();
        store.write("cart", "new").await.unwrap();
        assert_eq!(store.read("cart").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileSnapshotStore::new(dir.path());
            store.write("cart", "persisted").await.unwrap();
        }
        let reopened = FileSnapshotStore::new(dir.path());
        assert_eq!(
            reopened.read("cart").await.unwrap().as_deref(),
            Some("persisted")
        );
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path());

        assert!(store.read("../etc/passwd").await.is_err());
        assert!(store.write("a/b", "x").await.is_err());
        assert!(store.write("", "x").await.is_err());
    }
}
