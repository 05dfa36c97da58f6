use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::clock::Clock;
use crate::entry::{Entry, RawEntry};
use crate::error::StoreError;
use crate::store::Store;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// Typed TTL layer over a type-agnostic store.
///
/// An `ExpiringCache` is bound to one namespace, one default TTL, and one
/// clock. Reads past the expiration behave exactly like a miss and purge the
/// dead entry as a side effect, so a value never outlives its TTL even
/// without a background sweep.
pub struct ExpiringCache<V> {
    namespace: String,
    ttl_hours: i64,
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    _marker: PhantomData<fn() -> V>,
}

impl<V> Clone for ExpiringCache<V> {
    fn clone(&self) -> Self {
        ExpiringCache {
            namespace: self.namespace.clone(),
            ttl_hours: self.ttl_hours,
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            _marker: PhantomData,
        }
    }
}

impl<V> ExpiringCache<V>
where
    V: Serialize + DeserializeOwned + Send + Sync,
{
    /// Create a cache over `store`, scoped to `namespace`, expiring entries
    /// `ttl_hours` after each write.
    pub fn new(
        namespace: &str,
        store: Arc<dyn Store>,
        clock: Arc<dyn Clock>,
        ttl_hours: i64,
    ) -> Self {
        ExpiringCache {
            namespace: namespace.to_string(),
            ttl_hours,
            store,
            clock,
            _marker: PhantomData,
        }
    }

    /// The default TTL in hours for this cache.
    pub fn ttl_hours(&self) -> i64 {
        self.ttl_hours
    }

    /// Write `value` under `key` with the default TTL, overwriting any
    /// existing entry. Durable before return.
    pub async fn put(&self, key: &str, value: &V) -> Result<(), StoreError> {
        self.put_with_ttl(key, value, self.ttl_hours).await
    }

    /// Write `value` under `key`, expiring `ttl_hours` from now.
    pub async fn put_with_ttl(&self, key: &str, value: &V, ttl_hours: i64) -> Result<(), StoreError> {
        let now = self.clock.now_ms();
        let entry = Entry::new(value, now, now + ttl_hours * HOUR_MS);
        let raw = RawEntry::from_entry(&entry)?;

        self.store.set(&self.namespace, key, raw).await?;

        tracing::debug!(
            store = self.store.name(),
            namespace = %self.namespace,
            key,
            ttl_hours,
            "stored entry"
        );

        Ok(())
    }

    /// Return the stored value, or `None` if the key is missing or the entry
    /// has expired. Expired entries are removed before returning.
    pub async fn get(&self, key: &str) -> Result<Option<V>, StoreError> {
        let Some(raw) = self.store.get(&self.namespace, key).await? else {
            return Ok(None);
        };

        if raw.is_expired(self.clock.now_ms()) {
            tracing::debug!(
                store = self.store.name(),
                namespace = %self.namespace,
                key,
                "purging expired entry"
            );
            self.store.remove(&self.namespace, &[key]).await?;
            return Ok(None);
        }

        let entry: Entry<V> = raw.into_entry()?;
        Ok(Some(entry.value))
    }

    /// Remove the key unconditionally. Absent keys are not an error.
    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.store.remove(&self.namespace, &[key]).await
    }
}
