//! Markdown rendering for post and page content.
//!
//! Rendering runs outside the resolution engine (the classifier returns
//! entities untouched); the rendering layer calls in here when it needs
//! HTML. Plugin filters wrap the conversion: `PreRenderContent` sees the
//! raw Markdown, `PostRenderContent` sees the generated HTML.

use pulldown_cmark::{Options, Parser, html};

use crate::hooks::{HookEvent, HookRegistry};

/// Convert Markdown to HTML.
pub fn render_markdown(content: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(content, options);
    let mut out = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Convert Markdown to HTML with plugin filters applied around rendering.
pub fn render_content(content: &str, hooks: Option<&HookRegistry>) -> String {
    let markdown = match hooks {
        Some(hooks) => hooks.apply_filters(HookEvent::PreRenderContent, content.to_string()),
        None => content.to_string(),
    };

    let rendered = render_markdown(&markdown);

    match hooks {
        Some(hooks) => hooks.apply_filters(HookEvent::PostRenderContent, rendered),
        None => rendered,
    }
}

/// The content before the truncation marker, or all of it when no marker is
/// present.
pub fn truncated_content<'a>(content: &'a str, truncate_tag: &str) -> &'a str {
    match content.find(truncate_tag) {
        Some(idx) => &content[..idx],
        None => content,
    }
}

/// Whether the content carries a truncation marker.
pub fn is_truncated(content: &str, truncate_tag: &str) -> bool {
    content.contains(truncate_tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown_basic() {
        let html = render_markdown("# Title\n\nSome *emphasis*.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_render_content_filters() {
        let hooks = HookRegistry::new();
        hooks.register_filter(HookEvent::PreRenderContent, |c| c.replace("WORLD", "world"));
        hooks.register_filter(HookEvent::PostRenderContent, |c| {
            format!("<article>{c}</article>")
        });

        let html = render_content("hello WORLD", Some(&hooks));
        assert!(html.starts_with("<article>"));
        assert!(html.contains("hello world"));
    }

    #[test]
    fn test_render_content_without_hooks() {
        let html = render_content("plain text", None);
        assert!(html.contains("plain text"));
    }

    #[test]
    fn test_truncation() {
        let content = "intro text\n<!--more-->\nthe rest";
        assert!(is_truncated(content, "<!--more-->"));
        assert_eq!(truncated_content(content, "<!--more-->"), "intro text\n");

        let plain = "no marker here";
        assert!(!is_truncated(plain, "<!--more-->"));
        assert_eq!(truncated_content(plain, "<!--more-->"), plain);
    }
}
