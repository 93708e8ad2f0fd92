//! `[urls]` section: content-type prefixes and enabled routes.
//!
//! The post prefix is a template (free text plus `{{ year }}`,
//! `{{ month }}`, `{{ day }}` placeholders) and may be empty - the
//! documented-permissive setup where bare paths are tried as post slugs.
//! Archive/category/tag/author prefixes and the RSS path are literal text;
//! category/tag/author must be non-empty while enabled.

use serde::{Deserialize, Serialize};

use crate::config::types::{ConfigDiagnostics, FieldPath};
use crate::route::PatternSpec;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlsConfig {
    /// Generate URLs with a trailing slash.
    pub append_slash: bool,
    /// Post prefix template. May be empty.
    pub post_prefix: String,
    pub archive: ArchiveConfig,
    pub category: CategoryConfig,
    pub tag: TagConfig,
    pub author: AuthorConfig,
    pub rss: RssConfig,
}

impl Default for UrlsConfig {
    fn default() -> Self {
        Self {
            append_slash: true,
            post_prefix: "{{ year }}/{{ month }}/{{ day }}".to_string(),
            archive: ArchiveConfig::default(),
            category: CategoryConfig::default(),
            tag: TagConfig::default(),
            author: AuthorConfig::default(),
            rss: RssConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub enabled: bool,
    /// Literal prefix before `YYYY[/MM[/DD]]`. May be empty.
    pub prefix: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    pub enabled: bool,
    pub prefix: String,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: "category".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    pub enabled: bool,
    pub prefix: String,
    /// Upper bound on tags named in one `+`-joined segment.
    pub max_per_query: usize,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: "tag".to_string(),
            max_per_query: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub enabled: bool,
    pub prefix: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: "author".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RssConfig {
    pub enabled: bool,
    /// Exact feed path.
    pub path: String,
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "rss".to_string(),
        }
    }
}

impl UrlsConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        // A malformed post prefix is fatal at load time, never a
        // per-request failure
        if let Err(err) = PatternSpec::compile(&self.post_prefix) {
            diag.error(FieldPath::new("urls.post_prefix"), err.to_string());
        }
        if self.post_prefix.is_empty() {
            diag.warn(
                FieldPath::new("urls.post_prefix"),
                "empty post prefix: bare paths are tried as post slugs before pages",
            );
        }

        let literals = [
            (
                FieldPath::new("urls.archive.prefix"),
                &self.archive.prefix,
                self.archive.enabled,
                true,
            ),
            (
                FieldPath::new("urls.category.prefix"),
                &self.category.prefix,
                self.category.enabled,
                false,
            ),
            (
                FieldPath::new("urls.tag.prefix"),
                &self.tag.prefix,
                self.tag.enabled,
                false,
            ),
            (
                FieldPath::new("urls.author.prefix"),
                &self.author.prefix,
                self.author.enabled,
                false,
            ),
            (
                FieldPath::new("urls.rss.path"),
                &self.rss.path,
                self.rss.enabled,
                false,
            ),
        ];

        for (field, value, enabled, may_be_empty) in literals {
            if value.contains("{{") {
                diag.error(field, "placeholders are only allowed in the post prefix");
            }
            if enabled && !may_be_empty && value.is_empty() {
                diag.error_with_hint(
                    field,
                    "must not be empty while the route is enabled",
                    "set a prefix or disable the route",
                );
            }
        }

        if self.tag.enabled && self.tag.max_per_query == 0 {
            diag.error(
                FieldPath::new("urls.tag.max_per_query"),
                "must be greater than zero",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.urls.append_slash);
        assert_eq!(config.urls.post_prefix, "{{ year }}/{{ month }}/{{ day }}");
        assert!(config.urls.archive.enabled);
        assert_eq!(config.urls.archive.prefix, "");
        assert_eq!(config.urls.category.prefix, "category");
        assert_eq!(config.urls.tag.prefix, "tag");
        assert_eq!(config.urls.tag.max_per_query, 5);
        assert_eq!(config.urls.author.prefix, "author");
        assert_eq!(config.urls.rss.path, "rss");
    }

    #[test]
    fn test_custom_config() {
        let config = test_parse_config(
            "[urls]\npost_prefix = \"posts\"\n[urls.category]\nprefix = \"topics\"\n[urls.rss]\nenabled = false",
        );
        assert_eq!(config.urls.post_prefix, "posts");
        assert_eq!(config.urls.category.prefix, "topics");
        assert!(!config.urls.rss.enabled);
    }

    #[test]
    fn test_validate_default_is_clean() {
        let mut diag = ConfigDiagnostics::new();
        UrlsConfig::default().validate(&mut diag);
        assert!(!diag.has_errors());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_validate_bad_template() {
        let urls = UrlsConfig {
            post_prefix: "{{ year }}/{{ year }}".to_string(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        urls.validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_validate_empty_post_prefix_warns() {
        let urls = UrlsConfig {
            post_prefix: String::new(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        urls.validate(&mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn test_validate_empty_reserved_prefix() {
        let mut urls = UrlsConfig::default();
        urls.category.prefix = String::new();
        let mut diag = ConfigDiagnostics::new();
        urls.validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_validate_empty_archive_prefix_allowed() {
        // The archive prefix may be empty (dates alone form the path)
        let mut diag = ConfigDiagnostics::new();
        UrlsConfig::default().validate(&mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_validate_placeholder_in_literal_prefix() {
        let mut urls = UrlsConfig::default();
        urls.category.prefix = "{{ year }}".to_string();
        let mut diag = ConfigDiagnostics::new();
        urls.validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_validate_disabled_route_may_be_empty() {
        let mut urls = UrlsConfig::default();
        urls.category.enabled = false;
        urls.category.prefix = String::new();
        let mut diag = ConfigDiagnostics::new();
        urls.validate(&mut diag);
        assert!(!diag.has_errors());
    }
}
