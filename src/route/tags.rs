//! Tag-Set Parser.
//!
//! A tag index path names one or more tag slugs joined with `+`
//! (`python+django`). Order is preserved for deterministic display, but the
//! set is unordered for matching: a post must carry every named tag.

use smallvec::SmallVec;

use crate::utils::slug::is_valid_slug;

/// Parsed tag slugs, in path order. Most paths name only a couple of tags.
pub type TagSet<'a> = SmallVec<[&'a str; 4]>;

/// Split a tag path segment on `+` into an ordered set of tag slugs.
///
/// Empty components (`a++b`, `+a`, trailing `+`) and non-slug characters
/// reject the whole segment. Duplicate slugs collapse, first occurrence
/// kept.
pub fn parse_tag_set(segment: &str) -> Option<TagSet<'_>> {
    if segment.is_empty() {
        return None;
    }

    let mut slugs = TagSet::new();
    for part in segment.split('+') {
        if !is_valid_slug(part) {
            return None;
        }
        if !slugs.contains(&part) {
            slugs.push(part);
        }
    }
    Some(slugs)
}
