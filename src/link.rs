use std::fmt;
use url::Url;

/// An inbound URL as received at the deep-link boundary.
///
/// Immutable once constructed; the matcher only reads from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkUrl {
    url: Url,
}

impl DeepLinkUrl {
    /// Parse an inbound URL string. Returns `None` for malformed input;
    /// the matcher treats that as non-matching rather than an error.
    pub fn parse(input: &str) -> Option<Self> {
        Url::parse(input).ok().map(|url| DeepLinkUrl { url })
    }

    /// The URL scheme, e.g. "https".
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// The host component, if any.
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// The path component. Pattern matching applies to this, never to the
    /// full URL string, so host and scheme cannot cause false negatives.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Decoded query parameters in order of appearance.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// The underlying parsed URL.
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// Consume the wrapper, returning the parsed URL.
    pub fn into_url(self) -> Url {
        self.url
    }
}

impl From<Url> for DeepLinkUrl {
    fn from(url: Url) -> Self {
        DeepLinkUrl { url }
    }
}

impl fmt::Display for DeepLinkUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.url.fmt(f)
    }
}
