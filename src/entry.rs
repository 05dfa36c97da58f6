use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::StoreError;

/// A stored value together with its write time and expiration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<V> {
    /// The stored value.
    pub value: V,

    /// Unix timestamp in milliseconds of the write that produced this entry.
    pub written_at: i64,

    /// Unix timestamp in milliseconds.
    /// At or after this instant the entry reads as absent.
    pub expires_at: i64,
}

impl<V> Entry<V> {
    /// Create a new entry.
    pub fn new(value: V, written_at: i64, expires_at: i64) -> Self {
        Entry {
            value,
            written_at,
            expires_at,
        }
    }

    /// Check whether the entry has expired.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }
}

/// Serialized form of an entry as stores keep it.
///
/// Stores are type-agnostic: they hold the JSON-encoded `Entry<V>` plus a
/// copy of the expiration timestamp, so a store can evict expired data
/// without knowing how to deserialize the value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEntry {
    /// JSON encoding of the full `Entry<V>`.
    pub data: String,

    /// Mirror of `Entry::expires_at`, readable without deserializing `data`.
    pub expires_at: i64,
}

impl RawEntry {
    /// Serialize a typed entry into its stored form.
    pub fn from_entry<V: Serialize>(entry: &Entry<V>) -> Result<Self, StoreError> {
        let data = serde_json::to_string(entry)
            .map_err(|e| StoreError::Serialization(format!("encoding entry failed: {e}")))?;

        Ok(RawEntry {
            data,
            expires_at: entry.expires_at,
        })
    }

    /// Deserialize the stored form back into a typed entry.
    pub fn into_entry<V: DeserializeOwned>(self) -> Result<Entry<V>, StoreError> {
        serde_json::from_str(&self.data)
            .map_err(|e| StoreError::Serialization(format!("decoding entry failed: {e}")))
    }

    /// Check whether the entry has expired.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }
}
