//! URL path type for type-safe URL handling.
//!
//! - Internal representation: Always decoded (human-readable)
//! - Request boundary: Decode on input, encode on output
//!
//! The resolver works on the *route form* of a path: percent-decoded, query
//! string and fragment stripped, no leading or trailing slashes. `UrlPath`
//! owns the normalization; [`UrlPath::route_path`] produces the route form.

use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Decoded URL path (internal representation)
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts with `/`
/// - Page URLs end with `/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

impl UrlPath {
    /// Create from a raw request URL (decode percent-encoding, strip query string).
    pub fn from_browser(encoded: &str) -> Self {
        use percent_encoding::percent_decode_str;
        // Strip query string before decoding
        let path = encoded.split('?').next().unwrap_or(encoded);
        let decoded = percent_decode_str(path)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| path.to_string());
        Self::from_page(&decoded)
    }

    /// Create page URL (with trailing slash). Normalizes leading/trailing slashes.
    /// Strips query string and fragment.
    pub fn from_page(decoded: &str) -> Self {
        let trimmed = decoded.trim();

        // Handle root path specially
        if trimmed.is_empty() || trimmed == "/" {
            return Self(Arc::from("/"));
        }

        let path = Self::strip_query_fragment(trimmed);

        // Add leading slash if missing
        let with_leading = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };

        // Add trailing slash if missing (for page URLs)
        let normalized = if with_leading.ends_with('/') {
            with_leading
        } else {
            format!("{}/", with_leading)
        };

        Self(Arc::from(normalized))
    }

    /// Strip query string and fragment from a path using url crate.
    fn strip_query_fragment(path: &str) -> String {
        use percent_encoding::percent_decode_str;

        // Use a dummy base URL to parse the path
        static BASE: std::sync::OnceLock<url::Url> = std::sync::OnceLock::new();
        let base = BASE.get_or_init(|| url::Url::parse("http://x").unwrap());

        match base.join(path) {
            Ok(parsed) => {
                // url crate returns percent-encoded path, decode it
                percent_decode_str(parsed.path())
                    .decode_utf8()
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| parsed.path().to_string())
            }
            // Fallback to simple split if url parsing fails
            Err(_) => path.split(['?', '#']).next().unwrap_or(path).to_string(),
        }
    }

    /// Get the decoded URL path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The route form: no leading or trailing slashes.
    ///
    /// `/2024/01/hello/` -> `2024/01/hello`, `/` -> ``
    #[inline]
    pub fn route_path(&self) -> &str {
        self.0.trim_matches('/')
    }

    /// Path segments of the route form (empty iterator for the root path).
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.route_path().split('/').filter(|s| !s.is_empty())
    }

    /// Encode for browser (percent-encode non-ASCII and special characters).
    pub fn to_encoded(&self) -> String {
        use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
        self.0
            .split('/')
            .map(|segment| utf8_percent_encode(segment, NON_ALPHANUMERIC).to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Check if the URL path is empty (only contains `/`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty() || self.0.as_ref() == "/"
    }
}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for UrlPath {
    fn default() -> Self {
        Self::from_page("/")
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for UrlPath {
    fn from(s: String) -> Self {
        Self::from_page(&s)
    }
}

impl From<&str> for UrlPath {
    fn from(s: &str) -> Self {
        Self::from_page(s)
    }
}

impl PartialEq<str> for UrlPath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for UrlPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UrlPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_page(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_browser_encoded() {
        let url = UrlPath::from_browser("/posts/%E4%B8%AD%E6%96%87/");
        assert_eq!(url.as_str(), "/posts/中文/");

        let url = UrlPath::from_browser("/posts/hello%20world/");
        assert_eq!(url.as_str(), "/posts/hello world/");
    }

    #[test]
    fn test_from_browser_invalid_utf8() {
        // Invalid UTF-8 sequence should be preserved
        let url = UrlPath::from_browser("/posts/%FF/");
        assert_eq!(url.as_str(), "/posts/%FF/");
    }

    #[test]
    fn test_from_page() {
        let url = UrlPath::from_page("/2024/01/hello/");
        assert_eq!(url.as_str(), "/2024/01/hello/");
    }

    #[test]
    fn test_from_page_adds_slashes() {
        let url = UrlPath::from_page("2024/01/hello");
        assert_eq!(url.as_str(), "/2024/01/hello/");
    }

    #[test]
    fn test_from_page_strips_query_and_fragment() {
        let url = UrlPath::from_page("/posts/hello?page=2");
        assert_eq!(url.as_str(), "/posts/hello/");

        let url = UrlPath::from_page("/posts/hello#section");
        assert_eq!(url.as_str(), "/posts/hello/");

        let url = UrlPath::from_page("/posts/hello?v=1#section");
        assert_eq!(url.as_str(), "/posts/hello/");
    }

    #[test]
    fn test_route_path() {
        assert_eq!(UrlPath::from_page("/2024/01/hello/").route_path(), "2024/01/hello");
        assert_eq!(UrlPath::from_page("/").route_path(), "");
        assert_eq!(UrlPath::from_page("about").route_path(), "about");
    }

    #[test]
    fn test_segments() {
        let url = UrlPath::from_page("/about/team/");
        let segments: Vec<_> = url.segments().collect();
        assert_eq!(segments, vec!["about", "team"]);

        let root = UrlPath::from_page("/");
        assert_eq!(root.segments().count(), 0);
    }

    #[test]
    fn test_to_encoded() {
        let url = UrlPath::from_page("/posts/中文/");
        assert_eq!(url.to_encoded(), "/posts/%E4%B8%AD%E6%96%87/");
    }

    #[test]
    fn test_is_empty() {
        assert!(UrlPath::from_page("/").is_empty());
        assert!(!UrlPath::from_page("/about/").is_empty());
    }

    #[test]
    fn test_equality_and_display() {
        let url1 = UrlPath::from_page("/posts/hello/");
        let url2 = UrlPath::from_page("/posts/hello/");
        assert_eq!(url1, url2);
        assert_eq!(format!("{}", url1), "/posts/hello/");
    }

    #[test]
    fn test_serialize_deserialize() {
        let url = UrlPath::from_page("/posts/中文/");
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, r#""/posts/中文/""#);

        let parsed: UrlPath = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, url);
    }
}
