//! Route Classifier: priority dispatch over the compiled route table.
//!
//! The same literal path can be ambiguous across content types (a page slug
//! `news` versus a post whose prefix is the empty string). Classification
//! applies a fixed total order so every path has exactly one answer:
//!
//! 1. RSS exact path
//! 2. single post (falls through on a miss - a post-shaped path may
//!    legitimately be a page)
//! 3. date archive
//! 4. category index
//! 5. tag index
//! 6. author index
//! 7. page hierarchy fallback
//!
//! Classification is a pure computation over the immutable table plus
//! read-only store lookups; it is safe to run concurrently and classifying
//! the same path twice against one table yields identical results.

use crate::content::ContentQueries;
use crate::core::UrlPath;
use crate::utils::date::PartialDate;
use crate::utils::slug::is_valid_slug;

use super::disambiguate::disambiguate;
use super::hierarchy::resolve_page_path;
use super::result::Resolution;
use super::table::RouteTable;
use super::tags::parse_tag_set;

/// A normalized request path: percent-decoded, query string and fragment
/// stripped, no leading or trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    path: String,
}

impl RouteRequest {
    /// Normalize a raw request path (`/2024/01/hello/?page=2` ->
    /// `2024/01/hello`).
    pub fn new(raw: &str) -> Self {
        let url = UrlPath::from_browser(raw);
        Self {
            path: url.route_path().to_string(),
        }
    }

    /// The normalized path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path segments (empty for the root path).
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

impl From<&str> for RouteRequest {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl RouteTable {
    /// Classify a request path against every enabled content type.
    ///
    /// The root path is not a content path (index listings are the caller's
    /// concern) and resolves `NotFound`.
    pub fn classify<S: ContentQueries + ?Sized>(
        &self,
        request: &RouteRequest,
        store: &S,
    ) -> Resolution {
        let path = request.path();

        // 1. Special paths
        if let Some(rss) = self.rss.as_deref()
            && path == rss
        {
            return Resolution::Rss;
        }

        // 2. Single post. A calendar-invalid date simply fails the match;
        //    a miss falls through - never short-circuit to NotFound here.
        if let Some((date, slug)) = self.match_post(path)
            && date.validate().is_ok()
            && let Some(post) = disambiguate(slug, &date, store)
        {
            return Resolution::Post(post);
        }

        // 3. Date archive. Structurally matching but calendar-invalid dates
        //    are Invalid (400-class), not NotFound; an empty archive is a
        //    valid view regardless of whether posts exist in the range.
        if let Some(date) = self.match_archive(path) {
            return match date.validate() {
                Ok(()) => Resolution::Archive(date),
                Err(_) => Resolution::Invalid(date),
            };
        }

        // 4. Category. The prefix is a reserved literal segment: an unknown
        //    slug under it is NotFound, not a page fallthrough.
        if let Some(slug) = match_reserved(self.category.as_deref(), path)
            && is_valid_slug(slug)
        {
            return match store.find_category(slug) {
                Some(category) => Resolution::Category(category),
                None => Resolution::NotFound,
            };
        }

        // 5. Tag. Same shape as category with a `+`-joined slug set; every
        //    named tag must exist (AND semantics).
        if let Some(segment) = match_reserved(self.tag.as_deref(), path)
            && segment
                .chars()
                .all(|c| c == '+' || c.is_alphanumeric() || c == '_' || c == '-')
        {
            return match parse_tag_set(segment) {
                Some(slugs) if slugs.len() <= self.tag_max => {
                    match store.find_tags(&slugs) {
                        Some(tags) => Resolution::Tag(tags),
                        None => Resolution::NotFound,
                    }
                }
                _ => Resolution::NotFound,
            };
        }

        // 6. Author
        if let Some(username) = match_reserved(self.author.as_deref(), path)
            && is_valid_slug(username)
        {
            return match store.find_author(username) {
                Some(author) => Resolution::Author(author),
                None => Resolution::NotFound,
            };
        }

        // 7. Page hierarchy fallback
        let segments: Vec<&str> = request.segments().collect();
        match resolve_page_path(&segments, store) {
            Some(page) => Resolution::Page(page),
            None => Resolution::NotFound,
        }
    }

    /// Match the post pattern: prefix, then a single slug segment.
    fn match_post<'a>(&self, path: &'a str) -> Option<(PartialDate, &'a str)> {
        let (date, rest) = self.post.match_prefix(path)?;
        let slug = if self.post.is_empty() {
            rest
        } else {
            rest.strip_prefix('/')?
        };
        is_valid_slug(slug).then_some((date, slug))
    }

    /// Match the archive shape: prefix, then `YYYY[/MM[/DD]]` and nothing
    /// else. Returns the digit-shaped parts, not yet calendar-validated.
    fn match_archive(&self, path: &str) -> Option<PartialDate> {
        let prefix = self.archive.as_deref()?;
        let rest = if prefix.is_empty() {
            path
        } else {
            path.strip_prefix(prefix)?.strip_prefix('/')?
        };

        let mut date = PartialDate::EMPTY;
        for (i, part) in rest.split('/').enumerate() {
            match i {
                0 => date.year = Some(parse_exact_digits(part, 4)? as u16),
                1 => date.month = Some(parse_exact_digits(part, 2)? as u8),
                2 => date.day = Some(parse_exact_digits(part, 2)? as u8),
                _ => return None,
            }
        }
        date.year.is_some().then_some(date)
    }
}

/// Match `prefix/<remainder>` where remainder is one non-empty segment.
fn match_reserved<'a>(prefix: Option<&str>, path: &'a str) -> Option<&'a str> {
    let remainder = path.strip_prefix(prefix?)?.strip_prefix('/')?;
    (!remainder.is_empty() && !remainder.contains('/')).then_some(remainder)
}

/// Parse a string that is exactly `n` ASCII digits.
fn parse_exact_digits(s: &str, n: usize) -> Option<u32> {
    if s.len() != n || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::section::UrlsConfig;
    use crate::content::{
        Author, Category, InMemoryStore, Page, PageId, Post, PostStatus, Tag,
    };
    use crate::utils::date::DateTimeUtc;

    fn table_with(post_prefix: &str) -> RouteTable {
        let urls = UrlsConfig {
            post_prefix: post_prefix.to_string(),
            ..Default::default()
        };
        RouteTable::compile(&urls).unwrap()
    }

    fn make_post(slug: &str, at: DateTimeUtc) -> Post {
        Post {
            title: slug.to_string(),
            slug: slug.to_string(),
            status: PostStatus::Published,
            published_at: Some(at),
            ..Default::default()
        }
    }

    fn make_page(title: &str, slug: &str, parent: Option<PageId>) -> Page {
        Page {
            id: PageId(0),
            title: title.to_string(),
            slug: slug.to_string(),
            content: String::new(),
            parent,
            status: PostStatus::Published,
            published_at: Some(DateTimeUtc::from_ymd(2024, 1, 1)),
            menu_order: 0,
        }
    }

    fn test_store() -> InMemoryStore {
        InMemoryStore::with_clock(DateTimeUtc::from_ymd(2024, 6, 15))
    }

    #[test]
    fn test_route_request_normalization() {
        assert_eq!(RouteRequest::new("/2024/01/hello/").path(), "2024/01/hello");
        assert_eq!(RouteRequest::new("about/team?page=2").path(), "about/team");
        assert!(RouteRequest::new("/").is_root());
    }

    #[test]
    fn test_rss_path() {
        let table = table_with("{{ year }}");
        let store = test_store();
        assert!(matches!(
            table.classify(&RouteRequest::new("/rss/"), &store),
            Resolution::Rss
        ));
    }

    #[test]
    fn test_post_with_full_date_prefix() {
        let table = table_with("{{ year }}/{{ month }}/{{ day }}");
        let store = test_store();
        store
            .insert_post(make_post("hello", DateTimeUtc::from_ymd(2024, 1, 5)))
            .unwrap();

        let result = table.classify(&RouteRequest::new("/2024/01/05/hello/"), &store);
        match result {
            Resolution::Post(post) => assert_eq!(post.slug, "hello"),
            other => panic!("expected post, got {}", other.kind()),
        }

        // Wrong date segment: no such post, archive claims the path shape?
        // `2024/01/06/hello` is not archive-shaped (4 segments) and not a
        // page, so NotFound.
        let result = table.classify(&RouteRequest::new("/2024/01/06/hello/"), &store);
        assert!(result.is_not_found());
    }

    #[test]
    fn test_post_disambiguation_most_recent_wins() {
        let table = table_with("{{ year }}/{{ month }}");
        let store = test_store();
        store
            .insert_post(make_post("hello", DateTimeUtc::from_ymd(2024, 1, 5)))
            .unwrap();
        store
            .insert_post(make_post("hello", DateTimeUtc::from_ymd(2024, 1, 20)))
            .unwrap();

        let result = table.classify(&RouteRequest::new("/2024/01/hello/"), &store);
        match result {
            Resolution::Post(post) => {
                assert_eq!(post.published_at, Some(DateTimeUtc::from_ymd(2024, 1, 20)));
            }
            other => panic!("expected post, got {}", other.kind()),
        }
    }

    #[test]
    fn test_post_miss_falls_through_to_page() {
        // Post prefix is free text that can coincide with a page path
        let table = table_with("news");
        let store = test_store();
        let news = store.insert_page(make_page("News", "news", None)).unwrap();
        store
            .insert_page(make_page("Today", "today", Some(news.id)))
            .unwrap();

        // `news/today` is post-shaped (prefix `news` + slug `today`) but no
        // such post exists; the page claims it.
        let result = table.classify(&RouteRequest::new("/news/today/"), &store);
        match result {
            Resolution::Page(page) => assert_eq!(page.slug, "today"),
            other => panic!("expected page, got {}", other.kind()),
        }
    }

    #[test]
    fn test_empty_post_prefix_beats_page() {
        let table = table_with("");
        let store = test_store();
        store
            .insert_post(make_post("news", DateTimeUtc::from_ymd(2024, 1, 5)))
            .unwrap();
        store.insert_page(make_page("News", "news", None)).unwrap();

        // Documented ambiguity: priority order resolves to the post
        let result = table.classify(&RouteRequest::new("/news/"), &store);
        assert!(matches!(result, Resolution::Post(_)));
    }

    #[test]
    fn test_archive_paths() {
        let table = table_with("{{ year }}/{{ month }}/{{ day }}");
        let store = test_store();

        for (path, expected) in [
            ("/2024/", PartialDate::from_y(2024)),
            ("/2024/01/", PartialDate::from_ym(2024, 1)),
            ("/2024/01/05/", PartialDate::from_ymd(2024, 1, 5)),
        ] {
            let result = table.classify(&RouteRequest::new(path), &store);
            match result {
                Resolution::Archive(date) => assert_eq!(date, expected),
                other => panic!("expected archive for {path}, got {}", other.kind()),
            }
        }
    }

    #[test]
    fn test_archive_empty_range_is_valid() {
        // No posts at all: an archive path still resolves as Archive
        let table = table_with("{{ year }}/{{ month }}/{{ day }}");
        let store = test_store();
        let result = table.classify(&RouteRequest::new("/1999/12/"), &store);
        assert!(matches!(result, Resolution::Archive(_)));
    }

    #[test]
    fn test_archive_invalid_date_is_invalid_not_notfound() {
        let table = table_with("{{ year }}/{{ month }}/{{ day }}");
        let store = test_store();

        // February 30 never exists regardless of leap year
        let result = table.classify(&RouteRequest::new("/2024/02/30/"), &store);
        match result {
            Resolution::Invalid(date) => {
                assert_eq!(date, PartialDate::from_ymd(2024, 2, 30));
            }
            other => panic!("expected invalid, got {}", other.kind()),
        }

        let result = table.classify(&RouteRequest::new("/2024/13/"), &store);
        assert!(result.is_invalid());
    }

    #[test]
    fn test_archive_with_prefix() {
        let mut urls = UrlsConfig::default();
        urls.archive.prefix = "archives".to_string();
        let table = RouteTable::compile(&urls).unwrap();
        let store = test_store();

        let result = table.classify(&RouteRequest::new("/archives/2024/"), &store);
        assert!(matches!(result, Resolution::Archive(_)));

        // Without the prefix the year path is not archive-shaped; it is not
        // a page either, so NotFound.
        let result = table.classify(&RouteRequest::new("/2024/"), &store);
        assert!(result.is_not_found());
    }

    #[test]
    fn test_category_beats_page() {
        let table = table_with("{{ year }}/{{ month }}/{{ day }}");
        let store = test_store();
        store.insert_category(Category::new("tech", "Technology"));

        // A page that structurally shadows the category path
        let parent = store
            .insert_page(make_page("Category", "category", None))
            .unwrap();
        store
            .insert_page(make_page("Tech", "tech", Some(parent.id)))
            .unwrap();

        let result = table.classify(&RouteRequest::new("/category/tech/"), &store);
        match result {
            Resolution::Category(category) => assert_eq!(category.slug, "tech"),
            other => panic!("expected category, got {}", other.kind()),
        }
    }

    #[test]
    fn test_unknown_category_is_notfound_not_page() {
        let table = table_with("{{ year }}/{{ month }}/{{ day }}");
        let store = test_store();

        // Even with a page at the same literal path, the reserved prefix
        // makes an unknown slug NotFound
        let parent = store
            .insert_page(make_page("Category", "category", None))
            .unwrap();
        store
            .insert_page(make_page("Ghost", "ghost", Some(parent.id)))
            .unwrap();

        let result = table.classify(&RouteRequest::new("/category/ghost/"), &store);
        assert!(result.is_not_found());
    }

    #[test]
    fn test_tag_set_and_semantics() {
        let table = table_with("{{ year }}/{{ month }}/{{ day }}");
        let store = test_store();
        store.insert_tag(Tag::new("python", "Python"));
        store.insert_tag(Tag::new("django", "Django"));

        let result = table.classify(&RouteRequest::new("/tag/python+django/"), &store);
        match result {
            Resolution::Tag(tags) => {
                let slugs: Vec<&str> = tags.iter().map(|t| t.slug.as_str()).collect();
                assert_eq!(slugs, vec!["python", "django"]);
            }
            other => panic!("expected tag, got {}", other.kind()),
        }
    }

    #[test]
    fn test_tag_missing_member_is_notfound() {
        let table = table_with("{{ year }}/{{ month }}/{{ day }}");
        let store = test_store();
        store.insert_tag(Tag::new("python", "Python"));

        // `rust` does not exist: no partial match on the existing tag
        let result = table.classify(&RouteRequest::new("/tag/python+rust/"), &store);
        assert!(result.is_not_found());
    }

    #[test]
    fn test_tag_cap_exceeded_is_notfound() {
        let mut urls = UrlsConfig::default();
        urls.tag.max_per_query = 2;
        let table = RouteTable::compile(&urls).unwrap();
        let store = test_store();
        for slug in ["a", "b", "c"] {
            store.insert_tag(Tag::new(slug, slug));
        }

        let result = table.classify(&RouteRequest::new("/tag/a+b+c/"), &store);
        assert!(result.is_not_found());

        let result = table.classify(&RouteRequest::new("/tag/a+b/"), &store);
        assert!(matches!(result, Resolution::Tag(_)));
    }

    #[test]
    fn test_author_route() {
        let table = table_with("{{ year }}/{{ month }}/{{ day }}");
        let store = test_store();
        store.insert_author(Author::new("jdoe"));

        let result = table.classify(&RouteRequest::new("/author/jdoe/"), &store);
        match result {
            Resolution::Author(author) => assert_eq!(author.username, "jdoe"),
            other => panic!("expected author, got {}", other.kind()),
        }

        let result = table.classify(&RouteRequest::new("/author/ghost/"), &store);
        assert!(result.is_not_found());
    }

    #[test]
    fn test_page_hierarchy_fallback() {
        let table = table_with("{{ year }}/{{ month }}/{{ day }}");
        let store = test_store();
        let about = store.insert_page(make_page("About", "about", None)).unwrap();
        store
            .insert_page(make_page("Team", "team", Some(about.id)))
            .unwrap();

        let result = table.classify(&RouteRequest::new("/about/team/"), &store);
        match result {
            Resolution::Page(page) => {
                assert_eq!(page.slug, "team");
                assert_eq!(page.parent, Some(about.id));
            }
            other => panic!("expected page, got {}", other.kind()),
        }
    }

    #[test]
    fn test_root_path_is_notfound() {
        let table = table_with("{{ year }}/{{ month }}/{{ day }}");
        let store = test_store();
        assert!(table.classify(&RouteRequest::new("/"), &store).is_not_found());
    }

    #[test]
    fn test_classification_is_idempotent() {
        let table = table_with("{{ year }}/{{ month }}");
        let store = test_store();
        store
            .insert_post(make_post("hello", DateTimeUtc::from_ymd(2024, 1, 5)))
            .unwrap();

        let request = RouteRequest::new("/2024/01/hello/");
        let first = table.classify(&request, &store);
        let second = table.classify(&request, &store);
        assert_eq!(first.kind(), second.kind());
        match (first, second) {
            (Resolution::Post(a), Resolution::Post(b)) => {
                assert_eq!(a.slug, b.slug);
                assert_eq!(a.published_at, b.published_at);
            }
            _ => panic!("expected posts"),
        }
    }

    #[test]
    fn test_post_invalid_date_falls_through() {
        // Post prefix captures a month; `13` is digit-shaped but not a
        // calendar month, so the post match fails silently
        let table = table_with("{{ year }}/{{ month }}");
        let store = test_store();
        store
            .insert_post(make_post("hello", DateTimeUtc::from_ymd(2024, 1, 5)))
            .unwrap();

        let result = table.classify(&RouteRequest::new("/2024/13/hello/"), &store);
        assert!(result.is_not_found());
    }
}
