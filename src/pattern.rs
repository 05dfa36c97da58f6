use regex::Regex;

use crate::link::DeepLinkUrl;

/// Path pattern for rewrite links: `/a/` followed by one or more
/// alphanumerics, anchored at the start of the path.
pub const DEFAULT_DEEP_LINK_PATTERN: &str = "^/a/[a-zA-Z0-9]+";

/// Decides whether a URL is a rewrite link this SDK should resolve.
///
/// The pattern runs against the URL's path component only, so the link
/// domain and scheme never affect the decision.
#[derive(Debug, Clone)]
pub struct DeepLinkPattern {
    regex: Regex,
}

impl DeepLinkPattern {
    /// Create a pattern from a custom regular expression.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(DeepLinkPattern {
            regex: Regex::new(pattern)?,
        })
    }

    /// Whether the URL's path matches this pattern.
    pub fn matches(&self, url: &DeepLinkUrl) -> bool {
        self.regex.is_match(url.path())
    }
}

impl Default for DeepLinkPattern {
    fn default() -> Self {
        // The default pattern is a valid literal regex.
        DeepLinkPattern {
            regex: Regex::new(DEFAULT_DEEP_LINK_PATTERN).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(input: &str) -> DeepLinkUrl {
        DeepLinkUrl::parse(input).unwrap()
    }

    #[test]
    fn test_matches_rewrite_paths() {
        let pattern = DeepLinkPattern::default();

        assert!(pattern.matches(&link("https://links.example.com/a/AbC123")));
        assert!(pattern.matches(&link("http://example.com/a/x")));
        assert!(pattern.matches(&link(
            "https://links.example.com/a/60402396fbd5433eb35397b47ab2fb83?_e=user%40example.com"
        )));
    }

    #[test]
    fn test_rejects_non_rewrite_paths() {
        let pattern = DeepLinkPattern::default();

        assert!(!pattern.matches(&link("https://example.com/settings")));
        assert!(!pattern.matches(&link("https://example.com/")));
        // One or more alphanumerics required after the prefix.
        assert!(!pattern.matches(&link("https://example.com/a/")));
        assert!(!pattern.matches(&link("https://example.com/b/AbC123")));
    }

    #[test]
    fn test_matches_path_not_host_or_query() {
        let pattern = DeepLinkPattern::default();

        // "/a/..." appearing in the query must not count.
        assert!(!pattern.matches(&link("https://example.com/settings?next=/a/AbC123")));
        // Host text never matches the path pattern.
        assert!(!pattern.matches(&link("https://a.example.com/settings")));
    }

    #[test]
    fn test_custom_pattern() {
        let pattern = DeepLinkPattern::new("^/l/[0-9]+$").unwrap();

        assert!(pattern.matches(&link("https://example.com/l/42")));
        assert!(!pattern.matches(&link("https://example.com/a/AbC123")));
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        assert!(DeepLinkPattern::new("(unclosed").is_err());
    }
}
