//! `[site]` section: metadata used by feeds and generated links.

use serde::{Deserialize, Serialize};

use crate::config::types::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title (feed channel title).
    pub title: String,
    /// Site description (feed channel description).
    pub description: String,
    /// Absolute base URL, required when the RSS route is enabled.
    pub url: Option<String>,
    /// Content language code.
    pub language: String,
    /// Default author display name.
    pub author: String,
    /// Contact email used in feed author fields.
    pub email: String,
    /// Number of posts in feeds and recent listings.
    pub recent_posts: usize,
    /// Marker splitting a post into teaser and body.
    pub truncate_tag: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: "My Quillpress Blog".to_string(),
            description: String::new(),
            url: None,
            language: "en".to_string(),
            author: String::new(),
            email: String::new(),
            recent_posts: 20,
            truncate_tag: "<!--more-->".to_string(),
        }
    }
}

impl SiteInfoConfig {
    pub fn validate(&self, rss_enabled: bool, diag: &mut ConfigDiagnostics) {
        if rss_enabled && self.url.as_deref().is_none_or(str::is_empty) {
            diag.warn(
                FieldPath::new("site.url"),
                "no base url set; feed links will be relative",
            );
        }

        if self.truncate_tag.is_empty() {
            diag.error(
                FieldPath::new("site.truncate_tag"),
                "must be a non-empty string",
            );
        }

        if self.recent_posts == 0 {
            diag.error(
                FieldPath::new("site.recent_posts"),
                "must be greater than zero",
            );
        }
    }
}
