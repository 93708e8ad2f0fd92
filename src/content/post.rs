//! Post entity and publication status.

use serde::{Deserialize, Serialize};

use crate::utils::date::DateTimeUtc;

/// Publication status of a post or page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

/// A blog post.
///
/// Multiple posts may legally share a slug if their publication dates
/// differ; uniqueness is only guaranteed for `(slug, published_at)`
/// together. The disambiguator relies on that when coarse prefixes collide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    /// Slug used in URLs. Generated from the title on insert when empty.
    pub slug: String,
    /// Raw Markdown content.
    pub content: String,
    /// Author slug (matched by the author index route).
    pub author: String,
    pub status: PostStatus,
    /// None for unpublished posts; such posts never match a URL.
    pub published_at: Option<DateTimeUtc>,
    /// Category slugs.
    pub categories: Vec<String>,
    /// Tag slugs.
    pub tags: Vec<String>,
}

impl Post {
    /// Whether this post is visible at `now`: published status and a
    /// publication date that is not in the future.
    pub fn is_published(&self, now: DateTimeUtc) -> bool {
        self.status == PostStatus::Published && self.published_at.is_some_and(|at| at <= now)
    }

    /// Whether the post carries every one of the given tag slugs.
    pub fn has_all_tags(&self, slugs: &[&str]) -> bool {
        slugs.iter().all(|s| self.tags.iter().any(|t| t == s))
    }

    /// Display title, derived from the slug when the title is empty.
    pub fn post_title(&self) -> String {
        if !self.title.is_empty() {
            return self.title.clone();
        }
        let mut title = self.slug.replace('-', " ");
        if let Some(first) = title.get_mut(..1) {
            first.make_ascii_uppercase();
        }
        format!("{title}...")
    }
}
