//! Resolution result type.

use std::sync::Arc;

use crate::content::{Author, Category, Page, Post, Tag};
use crate::utils::date::PartialDate;

/// Outcome of classifying a request path.
///
/// Exactly one variant is populated; the result is terminal and passed to
/// the rendering layer untouched. `NotFound` maps to 404-class handling,
/// `Invalid` to 400-class handling by convention.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// A single post.
    Post(Arc<Post>),

    /// A single hierarchical page.
    Page(Arc<Page>),

    /// Date archive index view with the validated partial date.
    /// An empty archive is a valid view, not `NotFound`.
    Archive(PartialDate),

    /// Category index view.
    Category(Arc<Category>),

    /// Tag index view: every named tag, in path order (AND semantics).
    Tag(Vec<Arc<Tag>>),

    /// Author index view.
    Author(Arc<Author>),

    /// The RSS feed path.
    Rss,

    /// Well-formed path, no matching entity at any priority level.
    NotFound,

    /// Malformed calendar date inside an otherwise-matching archive path.
    /// Carries the raw captured parts for caller diagnostics.
    Invalid(PartialDate),
}

impl Resolution {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// True when the path resolved to some content or index view.
    pub const fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound | Self::Invalid(_))
    }

    /// Short tag for logging and template dispatch.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Post(_) => "post",
            Self::Page(_) => "page",
            Self::Archive(_) => "archive",
            Self::Category(_) => "category",
            Self::Tag(_) => "tag",
            Self::Author(_) => "author",
            Self::Rss => "rss",
            Self::NotFound => "not_found",
            Self::Invalid(_) => "invalid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(Resolution::NotFound.is_not_found());
        assert!(!Resolution::NotFound.is_found());

        let invalid = Resolution::Invalid(PartialDate::from_ymd(2024, 2, 30));
        assert!(invalid.is_invalid());
        assert!(!invalid.is_found());

        assert!(Resolution::Rss.is_found());
        assert!(Resolution::Archive(PartialDate::from_y(2024)).is_found());
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(Resolution::Rss.kind(), "rss");
        assert_eq!(Resolution::NotFound.kind(), "not_found");
        assert_eq!(
            Resolution::Archive(PartialDate::from_y(2024)).kind(),
            "archive"
        );
    }
}
