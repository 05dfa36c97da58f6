//! linkstead - deep-link matching and expiring local storage for mobile
//! marketing SDK cores
//!
//! Two cooperating components:
//! - **Deep-link matcher**: classifies inbound URLs against a rewrite-link
//!   pattern and resolves matches, trying an application-supplied local hook
//!   before deferred (remote) resolution.
//! - **Expiring local store**: durable, namespaced, TTL-bounded key-value
//!   persistence where expired entries read as absent.
//!
//! # Example
//!
//! ```ignore
//! use linkstead::{
//!     DeepLinkMatcher, FileStore, LocalStorage, MatcherConfig, Outcome, SystemClock,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(FileStore::open("sdk-state.json").await.unwrap());
//!     let storage = LocalStorage::new(store, Arc::new(SystemClock));
//!
//!     let matcher = DeepLinkMatcher::new(
//!         MatcherConfig::new(device_fingerprint()),
//!         Arc::new(HttpResolver::new(api_key)),
//!         storage.clone(),
//!     );
//!
//!     match matcher.handle("https://links.example.com/a/AbC123").await {
//!         Outcome::HandledLocally(url) | Outcome::HandledRemotely(url) => open(url),
//!         Outcome::NotHandled => { /* pass the URL through unchanged */ }
//!         Outcome::Failed(_) => { /* fall back to the original URL */ }
//!     }
//! }
//! ```

mod attribution;
mod cache;
mod clock;
mod entry;
mod error;
mod link;
mod matcher;
mod pattern;
mod resolver;
mod storage;
mod store;
pub mod stores;

// Re-export public API
pub use attribution::AttributionInfo;
pub use cache::ExpiringCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{Entry, RawEntry};
pub use error::{ResolveError, StoreError};
pub use link::DeepLinkUrl;
pub use matcher::{DeepLinkMatcher, MatcherConfig, Outcome};
pub use pattern::{DEFAULT_DEEP_LINK_PATTERN, DeepLinkPattern};
pub use resolver::{LocalHook, Resolution, Resolver};
pub use storage::{
    ATTRIBUTION_INFO_KEY, DEFAULT_EXPIRATION_HOURS, LocalStorage, LocalStorageBuilder,
    PENDING_PAYLOAD_KEY,
};
pub use store::Store;
pub use stores::file::FileStore;
pub use stores::memory::HashMapStore;
