use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::entry::RawEntry;
use crate::error::StoreError;
use crate::store::{Store, build_store_key};

/// Thread-safe in-memory store using HashMap with RwLock.
///
/// Nothing survives a process restart; use `FileStore` for durable state.
/// Useful for tests and for hosts that manage persistence themselves.
///
/// Expired entries are removed when `purge_expired` is called by the typed
/// layer; the map otherwise only shrinks via `remove`.
#[derive(Default)]
pub struct HashMapStore {
    state: RwLock<HashMap<String, RawEntry>>,
}

impl HashMapStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        HashMapStore {
            state: RwLock::new(HashMap::new()),
        }
    }

    /// Number of entries currently held, including expired ones not yet
    /// purged.
    pub async fn len(&self) -> usize {
        self.state.read().await.len()
    }

    /// Whether the store currently holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.is_empty()
    }

    /// Drop every entry whose expiration is at or before `now_ms`.
    ///
    /// Idempotent; safe to call from a periodic sweep.
    pub async fn purge_expired(&self, now_ms: i64) {
        let mut state = self.state.write().await;
        state.retain(|_, entry| !entry.is_expired(now_ms));
    }
}

#[async_trait]
impl Store for HashMapStore {
    fn name(&self) -> &'static str {
        "memory"
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
        Ok(())
    }

    async fn remove(&self, namespace: &str, keys: &[&str]) -> Result<(), StoreError> {
        let mut state = self.state.write().await;

        for key in keys {
            let store_key = build_store_key(namespace, key);
            state.remove(&store_key);
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
        let store = HashMapStore::new();

        let result = store.get("payload", "key1").await.unwrap();
        assert!(result.is_none());

        store.set("payload", "key1", raw("value1", 1_000)).await.unwrap();

        let result = store.get("payload", "key1").await.unwrap();
        assert!(result.is_some());

        store.remove("payload", &["key1"]).await.unwrap();

        let result = store.get("payload", "key1").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let store = HashMapStore::new();

        store.set("payload", "k", raw("a", 1_000)).await.unwrap();

        let result = store.get("attribution", "k").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_purge_expired_retains_live_entries() {
        let store = HashMapStore::new();

        store.set("payload", "live", raw("a", 2_000)).await.unwrap();
        store.set("payload", "dead", raw("b", 500)).await.unwrap();

        store.purge_expired(1_000).await;

        assert!(store.get("payload", "live").await.unwrap().is_some());
        assert!(store.get("payload", "dead").await.unwrap().is_none());
        assert_eq!(store.len().await, 1);

        // Purging again is a no-op.
        store.purge_expired(1_000).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_absent_key_is_ok() {
        let store = HashMapStore::new();
        store.remove("payload", &["missing"]).await.unwrap();
    }
}
