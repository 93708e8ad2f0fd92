//! RSS 2.0 feed generation.
//!
//! Builds a feed from the most recent published posts. The resolver returns
//! [`Resolution::Rss`](crate::route::Resolution::Rss) for the configured
//! feed path; the HTTP layer then calls in here for the XML body. No file
//! I/O happens in this core.

use anyhow::{Result, anyhow};
use rss::validation::Validate;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder};

use crate::config::PlatformConfig;
use crate::content::render::{render_markdown, truncated_content};
use crate::content::{ContentQueries, Post};
use crate::urls::post_url;

/// Build the RSS 2.0 XML for the site's recent published posts.
pub fn render_rss<S: ContentQueries + ?Sized>(config: &PlatformConfig, store: &S) -> Result<String> {
    let posts = store.recent_published_posts(config.site.recent_posts);

    let items: Vec<_> = posts
        .iter()
        .filter_map(|post| post_to_rss_item(post, config))
        .collect();

    let channel = ChannelBuilder::default()
        .title(config.site.title.clone())
        .link(config.site.url.clone().unwrap_or_default())
        .description(config.site.description.clone())
        .language(Some(config.site.language.clone()))
        .generator("quillpress".to_string())
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("RSS validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn post_to_rss_item(post: &Post, config: &PlatformConfig) -> Option<rss::Item> {
    let pub_date = post.published_at.map(|at| at.to_rfc2822())?;

    // Build full URL from base URL + generated post path
    let base_url = config
        .site
        .url
        .as_deref()
        .unwrap_or_default()
        .trim_end_matches('/');
    let link = format!("{}{}", base_url, post_url(&config.urls, post)?);

    // Teaser only: content before the truncation marker
    let description = render_markdown(truncated_content(&post.content, &config.site.truncate_tag));

    Some(
        ItemBuilder::default()
            .title(post.post_title())
            .link(Some(link.clone()))
            .guid(GuidBuilder::default().permalink(true).value(link).build())
            .description(Some(description))
            .pub_date(pub_date)
            .build(),
    )
}
