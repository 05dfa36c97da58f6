use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::error::ResolveError;
use crate::link::DeepLinkUrl;
use crate::pattern::DeepLinkPattern;
use crate::resolver::{LocalHook, Resolver};
use crate::storage::LocalStorage;

/// How a deep link was (or was not) handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The application's local hook claimed the link.
    HandledLocally(Url),
    /// Deferred resolution produced the destination.
    HandledRemotely(Url),
    /// The URL is not a rewrite link; nothing was done.
    NotHandled,
    /// The URL is a rewrite link but resolution failed. Callers should fall
    /// back to opening the original URL unchanged.
    Failed(ResolveError),
}

/// Configuration for `DeepLinkMatcher`.
pub struct MatcherConfig {
    /// Pattern deciding which URLs are rewrite links.
    pub pattern: DeepLinkPattern,
    /// Device fingerprint sent to the resolver for deferred lookups.
    pub fingerprint: String,
    /// Deadline for a deferred resolution round trip.
    pub resolve_timeout: Duration,
}

impl MatcherConfig {
    /// Default pattern and a 5 second resolver deadline.
    pub fn new(fingerprint: impl Into<String>) -> Self {
        MatcherConfig {
            pattern: DeepLinkPattern::default(),
            fingerprint: fingerprint.into(),
            resolve_timeout: Duration::from_secs(5),
        }
    }
}

/// Classifies inbound URLs and resolves the ones that are rewrite links.
///
/// The matcher itself holds no mutable state; concurrent `handle` calls are
/// independent. Abandoning a pending `handle` future leaves storage
/// untouched, because attribution is only written after the resolver has
/// fully succeeded.
pub struct DeepLinkMatcher {
    config: MatcherConfig,
    resolver: Arc<dyn Resolver>,
    local_hook: Option<Arc<dyn LocalHook>>,
    storage: LocalStorage,
}

impl DeepLinkMatcher {
    /// Create a matcher with no local hook.
    pub fn new(config: MatcherConfig, resolver: Arc<dyn Resolver>, storage: LocalStorage) -> Self {
        DeepLinkMatcher {
            config,
            resolver,
            local_hook: None,
            storage,
        }
    }

    /// Register the application's local hook, consulted before any deferred
    /// resolution.
    pub fn with_local_hook(mut self, hook: Arc<dyn LocalHook>) -> Self {
        self.local_hook = Some(hook);
        self
    }

    /// Whether `input` is a rewrite link this matcher would resolve.
    ///
    /// Malformed input is non-matching, never an error.
    pub fn can_handle(&self, input: &str) -> bool {
        match DeepLinkUrl::parse(input) {
            Some(url) => self.config.pattern.matches(&url),
            None => false,
        }
    }

    /// Resolve a deep link.
    ///
    /// Re-validates the pattern even if the caller already checked
    /// `can_handle`; non-matching input returns `Outcome::NotHandled` with
    /// no side effects. Matching links go to the local hook first, then to
    /// deferred resolution under the configured deadline.
    pub async fn handle(&self, input: &str) -> Outcome {
        let Some(url) = DeepLinkUrl::parse(input) else {
            tracing::debug!(input, "ignoring malformed URL");
            return Outcome::NotHandled;
        };

        if !self.config.pattern.matches(&url) {
            return Outcome::NotHandled;
        }

        if let Some(hook) = &self.local_hook
            && let Some(destination) = hook.try_handle(&url)
        {
            tracing::debug!(%url, %destination, "local hook claimed deep link");
            return Outcome::HandledLocally(destination);
        }

        self.resolve_deferred(&url).await
    }

    async fn resolve_deferred(&self, url: &DeepLinkUrl) -> Outcome {
        let lookup = self.resolver.resolve(&self.config.fingerprint);

        let resolution = match tokio::time::timeout(self.config.resolve_timeout, lookup).await {
            Ok(Ok(resolution)) => resolution,
            Ok(Err(e)) => {
                tracing::warn!(%url, error = %e, "deferred resolution failed");
                return Outcome::Failed(e);
            }
            Err(_) => {
                tracing::warn!(%url, "deferred resolution timed out");
                return Outcome::Failed(ResolveError::Timeout);
            }
        };

        if let Some(attribution) = &resolution.attribution {
            // The destination is still handed back on a storage failure;
            // only the cached attribution is lost, and that failure is
            // already surfaced through the storage API.
            if let Err(e) = self.storage.save_attribution_info(attribution).await {
                tracing::warn!(%url, error = %e, "failed to persist attribution info");
            }
        }

        tracing::debug!(%url, destination = %resolution.destination, "deep link resolved");
        Outcome::HandledRemotely(resolution.destination)
    }
}
