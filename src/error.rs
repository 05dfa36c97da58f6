/// Error type for store operations.
///
/// Absence and expiry are not errors; they surface as `Ok(None)` from reads.
/// A `StoreError` always means the storage layer itself failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The backing medium failed (disk full, permissions, unreadable file).
    #[error("[{store}] storage error for '{namespace}::{key}': {message}")]
    Io {
        store: String,
        namespace: String,
        key: String,
        message: String,
    },
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Create a new I/O error.
    pub fn io(
        store: impl Into<String>,
        namespace: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        StoreError::Io {
            store: store.into(),
            namespace: namespace.into(),
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Error type for deferred deep-link resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The resolver did not answer within the configured deadline.
    #[error("deferred resolution timed out")]
    Timeout,
    /// The resolver failed (transport error, bad response).
    #[error("deferred resolution failed: {0}")]
    Network(String),
    /// The resolver answered but the fingerprint matched no pending link.
    #[error("no deferred link matched this device")]
    NoMatch,
}
