//! Post Disambiguator.
//!
//! When a post prefix under-specifies the date (year/month only, or no date
//! at all), several published posts may share the resulting
//! `(slug, partial-date)` key. Operators using coarse prefixes expect slug
//! collisions across months; "most recent wins" is the documented
//! resolution policy.

use std::sync::Arc;

use crate::content::{ContentQueries, Post};
use crate::utils::date::PartialDate;

/// Select the single published post for a slug and partial date.
///
/// Queries posts whose publication date falls in the implied range (full
/// year, year+month, exact day, or all time for a date-free prefix). With
/// more than one candidate, the latest `published_at` wins.
pub fn disambiguate<S: ContentQueries + ?Sized>(
    slug: &str,
    date: &PartialDate,
    store: &S,
) -> Option<Arc<Post>> {
    store
        .find_published_posts(slug, date)
        .into_iter()
        .max_by_key(|post| post.published_at)
}
