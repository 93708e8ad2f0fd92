//! Page Hierarchy Resolver.
//!
//! Walks a multi-segment path against nested parent/child page slugs of
//! arbitrary depth. Evaluated strictly last: it accepts any path shape, so
//! every other content type gets its chance first.

use std::sync::Arc;

use crate::content::{ContentQueries, Page};
use crate::utils::slug::is_valid_slug;

/// Resolve an ordered sequence of path segments to a page.
///
/// Each step requires a page whose slug matches the current segment *and*
/// whose parent is the page from the previous step (the root step has no
/// parent). Any miss fails the whole walk - there is no partial-match
/// fallback, because the same slug may exist under multiple parents and a
/// wrong partial match would silently produce the wrong page.
pub fn resolve_page_path<S: ContentQueries + ?Sized>(
    segments: &[&str],
    store: &S,
) -> Option<Arc<Page>> {
    if segments.is_empty() {
        return None;
    }

    let mut current: Option<Arc<Page>> = None;
    for segment in segments {
        if !is_valid_slug(segment) {
            return None;
        }
        let parent = current.as_ref().map(|p| p.id);
        current = Some(store.find_page(segment, parent)?);
    }
    current
}
