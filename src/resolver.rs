use async_trait::async_trait;
use url::Url;

use crate::attribution::AttributionInfo;
use crate::error::ResolveError;
use crate::link::DeepLinkUrl;

/// Result of a successful deferred resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The real destination the rewrite link points to.
    pub destination: Url,
    /// Attribution for the campaign link, when the resolver can supply it.
    pub attribution: Option<AttributionInfo>,
}

/// Remote lookup that maps a device fingerprint to the destination of a
/// deferred deep link.
///
/// The transport (HTTP, request schema) is owned by the implementation; the
/// matcher only sees the outcome.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve the pending link for this device, if any.
    async fn resolve(&self, fingerprint: &str) -> Result<Resolution, ResolveError>;
}

/// Application-supplied hook that may claim a deep link before any remote
/// resolution happens (e.g. campaign-specific custom handling).
pub trait LocalHook: Send + Sync {
    /// Return the destination to open if this hook claims the URL.
    fn try_handle(&self, url: &DeepLinkUrl) -> Option<Url>;
}

impl<F> LocalHook for F
where
    F: Fn(&DeepLinkUrl) -> Option<Url> + Send + Sync,
{
    fn try_handle(&self, url: &DeepLinkUrl) -> Option<Url> {
        self(url)
    }
}
