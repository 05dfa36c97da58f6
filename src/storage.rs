//! Process-local SDK storage: cached push payloads and attribution info.
//!
//! This is the persistence the rest of the SDK shares: a push payload that
//! arrived while the app was backgrounded, and the attribution record for
//! the link that caused the current open. Both expire after 24 hours by
//! default and read as absent afterwards.

use serde_json::Value;
use std::sync::Arc;

use crate::attribution::AttributionInfo;
use crate::cache::ExpiringCache;
use crate::clock::Clock;
use crate::error::StoreError;
use crate::store::Store;

/// Key under which the pending push payload is cached.
pub const PENDING_PAYLOAD_KEY: &str = "pending_payload";

/// Key under which attribution info is cached.
pub const ATTRIBUTION_INFO_KEY: &str = "attribution_info";

/// Default TTL for both caches, in hours.
pub const DEFAULT_EXPIRATION_HOURS: i64 = 24;

const PAYLOAD_NAMESPACE: &str = "payload";
const ATTRIBUTION_NAMESPACE: &str = "attribution";

/// Builder for `LocalStorage`.
///
/// Both caches default to the shared 24-hour TTL; either can be overridden
/// independently.
pub struct LocalStorageBuilder {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    payload_ttl_hours: i64,
    attribution_ttl_hours: i64,
}

impl LocalStorageBuilder {
    /// Start a builder over the given store and clock.
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        LocalStorageBuilder {
            store,
            clock,
            payload_ttl_hours: DEFAULT_EXPIRATION_HOURS,
            attribution_ttl_hours: DEFAULT_EXPIRATION_HOURS,
        }
    }

    /// Override the TTL for the pending-payload cache.
    pub fn payload_ttl_hours(mut self, hours: i64) -> Self {
        self.payload_ttl_hours = hours;
        self
    }

    /// Override the TTL for the attribution cache.
    pub fn attribution_ttl_hours(mut self, hours: i64) -> Self {
        self.attribution_ttl_hours = hours;
        self
    }

    /// Build the storage facade.
    pub fn build(self) -> LocalStorage {
        LocalStorage {
            payload: ExpiringCache::new(
                PAYLOAD_NAMESPACE,
                Arc::clone(&self.store),
                Arc::clone(&self.clock),
                self.payload_ttl_hours,
            ),
            attribution: ExpiringCache::new(
                ATTRIBUTION_NAMESPACE,
                self.store,
                self.clock,
                self.attribution_ttl_hours,
            ),
        }
    }
}

/// Facade over the two SDK caches.
#[derive(Clone)]
pub struct LocalStorage {
    payload: ExpiringCache<Value>,
    attribution: ExpiringCache<AttributionInfo>,
}

impl LocalStorage {
    /// Create storage with the default 24-hour TTLs.
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        LocalStorageBuilder::new(store, clock).build()
    }

    /// Start a builder to customize TTLs.
    pub fn builder(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> LocalStorageBuilder {
        LocalStorageBuilder::new(store, clock)
    }

    /// Cache a push payload that arrived while the app was backgrounded.
    pub async fn save_pending_payload(&self, payload: &Value) -> Result<(), StoreError> {
        self.payload.put(PENDING_PAYLOAD_KEY, payload).await
    }

    /// The cached push payload, if one was saved within the TTL window.
    pub async fn pending_payload(&self) -> Result<Option<Value>, StoreError> {
        self.payload.get(PENDING_PAYLOAD_KEY).await
    }

    /// Drop the cached push payload.
    pub async fn clear_pending_payload(&self) -> Result<(), StoreError> {
        self.payload.delete(PENDING_PAYLOAD_KEY).await
    }

    /// Cache the attribution record for the link that opened the app.
    pub async fn save_attribution_info(&self, info: &AttributionInfo) -> Result<(), StoreError> {
        self.attribution.put(ATTRIBUTION_INFO_KEY, info).await
    }

    /// The cached attribution record, if saved within the TTL window.
    pub async fn attribution_info(&self) -> Result<Option<AttributionInfo>, StoreError> {
        self.attribution.get(ATTRIBUTION_INFO_KEY).await
    }

    /// Drop the cached attribution record.
    pub async fn clear_attribution_info(&self) -> Result<(), StoreError> {
        self.attribution.delete(ATTRIBUTION_INFO_KEY).await
    }
}
