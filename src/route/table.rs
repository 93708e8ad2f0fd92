//! Compiled route table.
//!
//! One immutable structure owning every enabled content-type matcher,
//! rebuilt as a unit whenever configuration changes. Readers always see
//! either the fully-old or fully-new table (the config handle swaps the
//! whole snapshot atomically), never a partially rebuilt one.

use crate::config::section::UrlsConfig;
use crate::log;

use super::pattern::{PatternSpec, TemplateError};

/// Compiled matchers for every enabled content type.
///
/// Prefix semantics:
/// - `post` may be a zero-length prefix (the documented-permissive setup
///   where bare paths are tried as post slugs first).
/// - `archive` is a literal prefix and may be empty.
/// - `category`/`tag`/`author` are reserved literal prefixes; an empty or
///   disabled prefix disables the route entirely.
/// - `rss` is an exact path.
#[derive(Debug, Clone)]
pub struct RouteTable {
    pub(crate) post: PatternSpec,
    /// Archive prefix, present when the archive route is enabled.
    pub(crate) archive: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) tag: Option<String>,
    /// Upper bound on tags named in a single `+`-joined path segment.
    pub(crate) tag_max: usize,
    pub(crate) author: Option<String>,
    pub(crate) rss: Option<String>,
}

impl RouteTable {
    /// Compile the table from the `[urls]` configuration.
    ///
    /// Fails on a malformed post prefix template (fatal at load). Ambiguous
    /// but legal configurations are logged as advisories: the priority
    /// order always yields a deterministic winner.
    pub fn compile(urls: &UrlsConfig) -> Result<Self, TemplateError> {
        let post = PatternSpec::compile(&urls.post_prefix)?;

        let reserved = |enabled: bool, prefix: &str| {
            (enabled && !prefix.is_empty()).then(|| prefix.to_string())
        };

        let table = Self {
            post,
            archive: urls.archive.enabled.then(|| urls.archive.prefix.clone()),
            category: reserved(urls.category.enabled, &urls.category.prefix),
            tag: reserved(urls.tag.enabled, &urls.tag.prefix),
            tag_max: urls.tag.max_per_query,
            author: reserved(urls.author.enabled, &urls.author.prefix),
            rss: reserved(urls.rss.enabled, &urls.rss.path),
        };

        for advisory in table.detect_ambiguities() {
            log!("routes"; "ambiguous configuration: {advisory}");
        }
        crate::debug!("routes"; "compiled route table: archive={} category={} tag={} author={} rss={}",
            table.archive.is_some(), table.category.is_some(), table.tag.is_some(),
            table.author.is_some(), table.rss.is_some());

        Ok(table)
    }

    /// Detect prefix setups where two enabled routes could claim the same
    /// literal path. Advisory only: resolution stays deterministic.
    pub fn detect_ambiguities(&self) -> Vec<String> {
        let mut advisories = Vec::new();

        if self.post.is_empty() {
            advisories.push(
                "post prefix is empty; page-shaped paths are tried as post slugs first"
                    .to_string(),
            );
        }

        // Priority order; an earlier entry always beats a later one.
        let named: [(&str, Option<&str>); 5] = [
            ("rss", self.rss.as_deref()),
            ("archive", self.archive.as_deref().filter(|p| !p.is_empty())),
            ("category", self.category.as_deref()),
            ("tag", self.tag.as_deref()),
            ("author", self.author.as_deref()),
        ];
        for (i, (name_a, prefix_a)) in named.iter().enumerate() {
            let Some(prefix_a) = *prefix_a else { continue };
            for (name_b, prefix_b) in named.iter().skip(i + 1) {
                if *prefix_b == Some(prefix_a) {
                    advisories.push(format!(
                        "{name_a} and {name_b} share the prefix `{prefix_a}`; {name_a} wins by priority"
                    ));
                }
            }
        }

        advisories
    }

    /// Whether any index route besides posts/pages is active.
    pub fn has_index_routes(&self) -> bool {
        self.archive.is_some()
            || self.category.is_some()
            || self.tag.is_some()
            || self.author.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::section::UrlsConfig;

    #[test]
    fn test_compile_default_config() {
        let table = RouteTable::compile(&UrlsConfig::default()).unwrap();
        assert!(!table.post.is_empty());
        assert_eq!(table.archive.as_deref(), Some(""));
        assert_eq!(table.category.as_deref(), Some("category"));
        assert_eq!(table.tag.as_deref(), Some("tag"));
        assert_eq!(table.author.as_deref(), Some("author"));
        assert_eq!(table.rss.as_deref(), Some("rss"));
        assert!(table.has_index_routes());
    }

    #[test]
    fn test_compile_invalid_template() {
        let urls = UrlsConfig {
            post_prefix: "{{ year }}/{{ year }}".to_string(),
            ..Default::default()
        };
        assert!(RouteTable::compile(&urls).is_err());
    }

    #[test]
    fn test_disabled_routes_absent() {
        let mut urls = UrlsConfig::default();
        urls.category.enabled = false;
        urls.tag.prefix = String::new(); // empty prefix disables matching
        urls.rss.enabled = false;

        let table = RouteTable::compile(&urls).unwrap();
        assert!(table.category.is_none());
        assert!(table.tag.is_none());
        assert!(table.rss.is_none());
    }

    #[test]
    fn test_empty_post_prefix_advisory() {
        let urls = UrlsConfig {
            post_prefix: String::new(),
            ..Default::default()
        };
        let table = RouteTable::compile(&urls).unwrap();
        let advisories = table.detect_ambiguities();
        assert!(advisories.iter().any(|a| a.contains("post prefix is empty")));
    }

    #[test]
    fn test_shared_prefix_advisory() {
        let mut urls = UrlsConfig::default();
        urls.category.prefix = "topics".to_string();
        urls.tag.prefix = "topics".to_string();

        let table = RouteTable::compile(&urls).unwrap();
        let advisories = table.detect_ambiguities();
        assert!(
            advisories
                .iter()
                .any(|a| a.contains("category and tag") && a.contains("topics"))
        );
    }

    #[test]
    fn test_no_advisories_for_default() {
        let table = RouteTable::compile(&UrlsConfig::default()).unwrap();
        assert!(table.detect_ambiguities().is_empty());
    }
}
