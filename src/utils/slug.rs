//! Slug generation and validation.
//!
//! Slugs are the word-character-or-hyphen path segments that identify posts,
//! pages, categories, tags, and authors. The same shape check is shared by
//! the route classifier (does this remainder look like a slug?) and the
//! content store (is this stored slug legal?).

use deunicode::deunicode;

/// Check whether a string is a valid slug segment.
///
/// Word characters (alphanumeric or underscore) and hyphens, one or more.
/// No slashes, so a valid slug is always a single path segment.
pub fn is_valid_slug(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// Generate a slug from free text.
///
/// Unicode is transliterated to ASCII, everything is lowercased, and runs of
/// non-word characters collapse into single hyphens. Returns an empty string
/// when nothing slug-worthy survives; callers treat that as an error.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Generate a slug from a title, falling back to the first words of the
/// content when the title is empty.
pub fn slug_for_content(title: &str, content: &str) -> String {
    if !title.is_empty() {
        return slugify(title);
    }
    let lead: Vec<&str> = content.split_whitespace().take(5).collect();
    slugify(&lead.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("hello-world"));
        assert!(is_valid_slug("hello_world"));
        assert!(is_valid_slug("2024"));
        assert!(is_valid_slug("a"));

        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("hello/world"));
        assert!(!is_valid_slug("hello world"));
        assert!(!is_valid_slug("hello+world"));
        assert!(!is_valid_slug("hello."));
    }

    #[test]
    fn test_is_valid_slug_unicode() {
        // Python's \w matches unicode word characters; so do we
        assert!(is_valid_slug("中文"));
        assert!(is_valid_slug("café"));
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  spaced  out  "), "spaced-out");
    }

    #[test]
    fn test_slugify_unicode() {
        assert_eq!(slugify("Café au lait"), "cafe-au-lait");
    }

    #[test]
    fn test_slugify_degenerate() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slug_for_content_fallback() {
        assert_eq!(slug_for_content("My Title", "ignored"), "my-title");
        assert_eq!(
            slug_for_content("", "the first five words are used here"),
            "the-first-five-words-are"
        );
    }
}
