use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::entry::RawEntry;
use crate::error::StoreError;
use crate::store::{Store, build_store_key};

/// Durable store backed by a single JSON document on disk.
///
/// The whole store is one `{store_key: entry}` map, rewritten on every
/// mutation: the new document is written to a sibling temp file, synced, and
/// renamed over the old one, so a crash mid-write leaves the previous state
/// intact. `set` does not return before the rename completes.
///
/// Volumes are expected to be small (a handful of SDK-internal keys), so
/// whole-store locking and full rewrites are fine.
pub struct FileStore {
    path: PathBuf,
    state: RwLock<HashMap<String, RawEntry>>,
}

impl FileStore {
    /// Open a store at `path`, loading any existing document.
    ///
    /// A missing file starts the store empty. An unreadable or unparsable
    /// file is an error here rather than on every later call; callers should
    /// treat it as fatal at initialization.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let state = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                StoreError::Serialization(format!(
                    "store file {} is corrupt: {e}",
                    path.display()
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(StoreError::io(
                    "file",
                    "",
                    "",
                    format!("reading {} failed: {e}", path.display()),
                ));
            }
        };

        Ok(FileStore {
            path,
            state: RwLock::new(state),
        })
    }

    /// Drop every entry whose expiration is at or before `now_ms` and
    /// persist the result. Idempotent.
    pub async fn purge_expired(&self, now_ms: i64) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let before = state.len();
        state.retain(|_, entry| !entry.is_expired(now_ms));

        if state.len() != before {
            self.persist(&state, "", "").await?;
        }

        Ok(())
    }

    /// Write the current document to disk: temp file, fsync, rename.
    async fn persist(
        &self,
        state: &HashMap<String, RawEntry>,
        namespace: &str,
        key: &str,
    ) -> Result<(), StoreError> {
        let contents = serde_json::to_string(state)
            .map_err(|e| StoreError::Serialization(format!("encoding store file failed: {e}")))?;

        let tmp_path = self.path.with_extension("tmp");

        let io_err = |op: &str, e: std::io::Error| {
            StoreError::io("file", namespace, key, format!("{op} failed: {e}"))
        };

        let mut file = tokio::fs::File::create(&tmp_path)
            .await
            .map_err(|e| io_err("create", e))?;
        file.write_all(contents.as_bytes())
            .await
            .map_err(|e| io_err("write", e))?;
        file.sync_all().await.map_err(|e| io_err("sync", e))?;
        drop(file);

        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| io_err("rename", e))?;

        Ok(())
    }
}

#[async_trait]
impl Store for FileStore {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn get(&self, namespace: &str, key: &str) -> Result<Option<RawEntry>, StoreError> {
        let store_key = build_store_key(namespace, key);
        let state = self.state.read().await;
        Ok(state.get(&store_key).cloned())
    }

    async fn set(&self, namespace: &str, key: &str, entry: RawEntry) -> Result<(), StoreError> {
        let store_key = build_store_key(namespace, key);
        let mut state = self.state.write().await;
        state.insert(store_key, entry);
        self.persist(&state, namespace, key).await
    }

    async fn remove(&self, namespace: &str, keys: &[&str]) -> Result<(), StoreError> {
        let mut state = self.state.write().await;

        let mut changed = false;
        for key in keys {
            let store_key = build_store_key(namespace, key);
            changed |= state.remove(&store_key).is_some();
        }

        if changed {
            self.persist(&state, namespace, keys.first().copied().unwrap_or(""))
                .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;

    fn raw(value: &str, expires_at: i64) -> RawEntry {
        RawEntry::from_entry(&Entry::new(value.to_string(), 0, expires_at)).unwrap()
    }

    #[tokio::test]
    async fn test_get_set_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("state.json")).await.unwrap();

        assert!(store.get("payload", "key1").await.unwrap().is_none());

        store.set("payload", "key1", raw("value1", 1_000)).await.unwrap();
        assert!(store.get("payload", "key1").await.unwrap().is_some());

        store.remove("payload", &["key1"]).await.unwrap();
        assert!(store.get("payload", "key1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let store = FileStore::open(&path).await.unwrap();
            store.set("payload", "key1", raw("value1", 1_000)).await.unwrap();
        }

        let reopened = FileStore::open(&path).await.unwrap();
        let entry = reopened.get("payload", "key1").await.unwrap().unwrap();
        let decoded: Entry<String> = entry.into_entry().unwrap();
        assert_eq!(decoded.value, "value1");
    }

    #[tokio::test]
    async fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json")).await.unwrap();
        assert!(store.get("payload", "key1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let result = FileStore::open(&path).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_purge_expired_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let store = FileStore::open(&path).await.unwrap();
            store.set("payload", "dead", raw("a", 500)).await.unwrap();
            store.set("payload", "live", raw("b", 2_000)).await.unwrap();
            store.purge_expired(1_000).await.unwrap();
        }

        let reopened = FileStore::open(&path).await.unwrap();
        assert!(reopened.get("payload", "dead").await.unwrap().is_none());
        assert!(reopened.get("payload", "live").await.unwrap().is_some());
    }
}
