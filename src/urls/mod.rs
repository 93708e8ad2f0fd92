//! URL generation: the inverse of classification.
//!
//! Builds the canonical path for an entity from the same `[urls]`
//! configuration the classifier matches against, so a generated URL always
//! classifies back to the entity it was generated for.

use crate::config::section::UrlsConfig;
use crate::content::{Author, Category, Post};
use crate::core::UrlPath;

/// Normalize and apply the `append_slash` policy.
fn finish(urls: &UrlsConfig, path: &str) -> String {
    let normalized = UrlPath::from_page(path);
    if urls.append_slash {
        return normalized.as_str().to_string();
    }
    let trimmed = normalized.as_str().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// URL for a post, with prefix placeholders filled from its publication
/// date. `None` when the prefix needs a date the post does not have.
pub fn post_url(urls: &UrlsConfig, post: &Post) -> Option<String> {
    // Remove spaces so that either {{ year }} or {{year}} works
    let mut prefix = urls.post_prefix.replace(' ', "");

    if prefix.contains("{{") {
        let date = post.published_at?;
        prefix = prefix
            .replace("{{year}}", &format!("{:04}", date.year))
            .replace("{{month}}", &format!("{:02}", date.month))
            .replace("{{day}}", &format!("{:02}", date.day));
    }

    let path = if prefix.is_empty() {
        format!("/{}", post.slug)
    } else {
        format!("/{}/{}", prefix, post.slug)
    };
    Some(finish(urls, &path))
}

/// URL for a page given its canonical path (ancestor slugs joined with `/`).
pub fn page_url(urls: &UrlsConfig, full_path: &str) -> String {
    finish(urls, &format!("/{}", full_path.trim_matches('/')))
}

/// URL for a category index view; `None` when the route is disabled.
pub fn category_url(urls: &UrlsConfig, category: &Category) -> Option<String> {
    (urls.category.enabled && !urls.category.prefix.is_empty())
        .then(|| finish(urls, &format!("/{}/{}", urls.category.prefix, category.slug)))
}

/// URL for a tag index view over one or more tags (AND semantics).
pub fn tag_url(urls: &UrlsConfig, slugs: &[&str]) -> Option<String> {
    if !urls.tag.enabled || urls.tag.prefix.is_empty() || slugs.is_empty() {
        return None;
    }
    Some(finish(
        urls,
        &format!("/{}/{}", urls.tag.prefix, slugs.join("+")),
    ))
}

/// URL for an author index view; `None` when the route is disabled.
pub fn author_url(urls: &UrlsConfig, author: &Author) -> Option<String> {
    (urls.author.enabled && !urls.author.prefix.is_empty())
        .then(|| finish(urls, &format!("/{}/{}", urls.author.prefix, author.username)))
}

/// URL for a date archive view; `None` when the route is disabled.
pub fn archive_url(
    urls: &UrlsConfig,
    year: u16,
    month: Option<u8>,
    day: Option<u8>,
) -> Option<String> {
    if !urls.archive.enabled {
        return None;
    }

    let mut path = if urls.archive.prefix.is_empty() {
        format!("/{year:04}")
    } else {
        format!("/{}/{year:04}", urls.archive.prefix)
    };
    if let Some(month) = month {
        path.push_str(&format!("/{month:02}"));
        if let Some(day) = day {
            path.push_str(&format!("/{day:02}"));
        }
    }
    Some(finish(urls, &path))
}

/// URL for the RSS feed; `None` when the route is disabled.
pub fn rss_url(urls: &UrlsConfig) -> Option<String> {
    (urls.rss.enabled && !urls.rss.path.is_empty())
        .then(|| finish(urls, &format!("/{}", urls.rss.path)))
}
