use async_trait::async_trait;

use crate::entry::RawEntry;
use crate::error::StoreError;

/// A store is a common interface for writing, reading and deleting
/// namespaced key-value pairs.
///
/// Stores are type-agnostic and work with `RawEntry`, the serialized form of
/// an entry. Expired entries may be purged lazily on read; purging must be
/// idempotent.
#[async_trait]
pub trait Store: Send + Sync {
    /// A name for logging.
    ///
    /// # Example
    /// - "memory"
    /// - "file"
    fn name(&self) -> &'static str;

    /// Return the stored entry.
    ///
    /// The response must be `None` for missing keys. Stores do not apply TTL
    /// policy themselves; the typed layer decides expiry against its clock.
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<RawEntry>, StoreError>;

    /// Write the entry for the given key, overwriting any existing entry.
    ///
    /// Durable stores must have persisted the write before returning, so a
    /// subsequent read observes it even across a crash.
    async fn set(&self, namespace: &str, key: &str, entry: RawEntry) -> Result<(), StoreError>;

    /// Remove the key(s) from the store. Absent keys are not an error.
    async fn remove(&self, namespace: &str, keys: &[&str]) -> Result<(), StoreError>;
}

/// Build a composite store key from namespace and key.
///
/// Format: `{namespace}::{key}`
pub(crate) fn build_store_key(namespace: &str, key: &str) -> String {
    format!("{namespace}::{key}")
}
