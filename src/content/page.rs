//! Hierarchical page entity.

use serde::{Deserialize, Serialize};

use super::post::PostStatus;
use crate::utils::date::DateTimeUtc;

/// Opaque page identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(pub u64);

/// A hierarchical page.
///
/// Pages form a tree of unbounded depth through `parent`; a page's canonical
/// path is its ancestor slugs joined with `/`. Uniqueness is only guaranteed
/// for `(slug, parent)` together - the same slug may appear under different
/// parents, which is why path resolution never accepts a partial match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    /// Raw Markdown content.
    pub content: String,
    pub parent: Option<PageId>,
    pub status: PostStatus,
    pub published_at: Option<DateTimeUtc>,
    /// Sort key for navigation menus.
    pub menu_order: i32,
}

impl Page {
    /// Publication check for this page alone. The store additionally
    /// requires every ancestor to be published.
    pub fn is_published_self(&self, now: DateTimeUtc) -> bool {
        self.status == PostStatus::Published && self.published_at.is_some_and(|at| at <= now)
    }

    pub const fn is_child(&self) -> bool {
        self.parent.is_some()
    }
}
