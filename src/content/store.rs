//! Content lookup ports and the in-memory store.
//!
//! The route classifier only ever reads through [`ContentQueries`] - narrow
//! lookups used for final existence and disambiguation checks. The backing
//! storage (and its caching policy) is a collaborator; [`InMemoryStore`] is
//! the reference implementation used by the platform and its tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::author::Author;
use super::page::{Page, PageId};
use super::post::Post;
use super::taxonomy::{Category, Tag};
use crate::hooks::{HookEvent, HookRegistry};
use crate::utils::date::{DateTimeUtc, PartialDate};
use crate::utils::slug::{is_valid_slug, slug_for_content};

// ============================================================================
// Ports
// ============================================================================

/// Read-only content lookups the resolver depends on.
///
/// All queries are scoped to *published* content; draft and future-dated
/// entries are invisible to URL resolution. Implementations must answer
/// consistently for the duration of a single classification (the resolver
/// never observes partial state).
pub trait ContentQueries {
    /// Published posts with the given slug whose publication date falls
    /// inside the range implied by the partial date.
    fn find_published_posts(&self, slug: &str, range: &PartialDate) -> Vec<Arc<Post>>;

    /// Published page with the given slug directly under `parent`
    /// (`None` = top level).
    fn find_page(&self, slug: &str, parent: Option<PageId>) -> Option<Arc<Page>>;

    fn find_category(&self, slug: &str) -> Option<Arc<Category>>;

    /// Resolve every slug to a tag, all-or-nothing: if any slug is unknown
    /// the whole lookup is `None`. Result preserves input order.
    fn find_tags(&self, slugs: &[&str]) -> Option<Vec<Arc<Tag>>>;

    fn find_author(&self, username: &str) -> Option<Arc<Author>>;

    /// Most recent published posts, newest first (feed and index listings).
    fn recent_published_posts(&self, limit: usize) -> Vec<Arc<Post>>;
}

// ============================================================================
// Errors
// ============================================================================

/// Content write errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid slug `{0}`")]
    InvalidSlug(String),

    #[error("unable to generate a slug from the title or content")]
    EmptySlug,

    #[error("page must have a title")]
    PageTitleRequired,

    #[error("parent page not found")]
    ParentNotFound,
}

// ============================================================================
// InMemoryStore
// ============================================================================

/// Thread-safe in-memory content store.
///
/// Posts are keyed by slug (several posts may share one), pages by their
/// store-assigned id. The clock is injectable so publication windows are
/// deterministic under test.
#[derive(Debug)]
pub struct InMemoryStore {
    posts: RwLock<FxHashMap<String, Vec<Arc<Post>>>>,
    pages: RwLock<FxHashMap<PageId, Arc<Page>>>,
    categories: RwLock<FxHashMap<String, Arc<Category>>>,
    tags: RwLock<FxHashMap<String, Arc<Tag>>>,
    authors: RwLock<FxHashMap<String, Arc<Author>>>,
    next_page_id: AtomicU64,
    clock: RwLock<DateTimeUtc>,
    hooks: Option<Arc<HookRegistry>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_clock(DateTimeUtc::now())
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a fixed clock (deterministic publication checks).
    pub fn with_clock(now: DateTimeUtc) -> Self {
        Self {
            posts: RwLock::default(),
            pages: RwLock::default(),
            categories: RwLock::default(),
            tags: RwLock::default(),
            authors: RwLock::default(),
            next_page_id: AtomicU64::new(1),
            clock: RwLock::new(now),
            hooks: None,
        }
    }

    /// Attach a hook registry; `PostSavePost` fires when a published post is
    /// inserted.
    pub fn with_hooks(mut self, hooks: Arc<HookRegistry>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn set_clock(&self, now: DateTimeUtc) {
        *self.clock.write() = now;
    }

    pub fn now(&self) -> DateTimeUtc {
        *self.clock.read()
    }

    pub fn clear(&self) {
        self.posts.write().clear();
        self.pages.write().clear();
        self.categories.write().clear();
        self.tags.write().clear();
        self.authors.write().clear();
    }

    // ------------------------------------------------------------------------
    // writes
    // ------------------------------------------------------------------------

    /// Insert a post. An empty slug is generated from the title (or the
    /// first words of the content when the title is empty).
    pub fn insert_post(&self, mut post: Post) -> Result<Arc<Post>, StoreError> {
        if post.slug.is_empty() {
            post.slug = slug_for_content(&post.title, &post.content);
            if post.slug.is_empty() {
                return Err(StoreError::EmptySlug);
            }
        }
        if !is_valid_slug(&post.slug) {
            return Err(StoreError::InvalidSlug(post.slug));
        }

        let post = Arc::new(post);
        self.posts
            .write()
            .entry(post.slug.clone())
            .or_default()
            .push(Arc::clone(&post));

        if let Some(hooks) = &self.hooks
            && post.is_published(self.now())
        {
            hooks.run_actions(HookEvent::PostSavePost, &post);
        }

        Ok(post)
    }

    /// Insert a page; the store assigns its id. The parent, when given, must
    /// already exist.
    pub fn insert_page(&self, mut page: Page) -> Result<Arc<Page>, StoreError> {
        if page.title.is_empty() {
            return Err(StoreError::PageTitleRequired);
        }
        if page.slug.is_empty() {
            page.slug = slug_for_content(&page.title, &page.content);
        }
        if !is_valid_slug(&page.slug) {
            return Err(StoreError::InvalidSlug(page.slug));
        }

        let mut pages = self.pages.write();
        if let Some(parent) = page.parent
            && !pages.contains_key(&parent)
        {
            return Err(StoreError::ParentNotFound);
        }

        page.id = PageId(self.next_page_id.fetch_add(1, Ordering::Relaxed));
        let page = Arc::new(page);
        pages.insert(page.id, Arc::clone(&page));
        Ok(page)
    }

    pub fn insert_category(&self, category: Category) -> Arc<Category> {
        let category = Arc::new(category);
        self.categories
            .write()
            .insert(category.slug.clone(), Arc::clone(&category));
        category
    }

    pub fn insert_tag(&self, tag: Tag) -> Arc<Tag> {
        let tag = Arc::new(tag);
        self.tags.write().insert(tag.slug.clone(), Arc::clone(&tag));
        tag
    }

    pub fn insert_author(&self, author: Author) -> Arc<Author> {
        let author = Arc::new(author);
        self.authors
            .write()
            .insert(author.username.clone(), Arc::clone(&author));
        author
    }

    // ------------------------------------------------------------------------
    // reads
    // ------------------------------------------------------------------------

    /// Canonical path of a page: ancestor slugs joined with `/`.
    pub fn page_path(&self, id: PageId) -> Option<String> {
        let pages = self.pages.read();
        let mut segments = Vec::new();
        let mut current = pages.get(&id)?;
        loop {
            segments.push(current.slug.clone());
            match current.parent {
                Some(parent) => current = pages.get(&parent)?,
                None => break,
            }
        }
        segments.reverse();
        Some(segments.join("/"))
    }

    pub fn post_count(&self) -> usize {
        self.posts.read().values().map(Vec::len).sum()
    }

    pub fn page_count(&self) -> usize {
        self.pages.read().len()
    }

    /// A page is published only if its own status/date allow it and every
    /// ancestor is published as well.
    fn is_page_published(pages: &FxHashMap<PageId, Arc<Page>>, page: &Page, now: DateTimeUtc) -> bool {
        if !page.is_published_self(now) {
            return false;
        }
        let mut parent = page.parent;
        while let Some(id) = parent {
            match pages.get(&id) {
                Some(ancestor) if ancestor.is_published_self(now) => parent = ancestor.parent,
                _ => return false,
            }
        }
        true
    }
}

impl ContentQueries for InMemoryStore {
    fn find_published_posts(&self, slug: &str, range: &PartialDate) -> Vec<Arc<Post>> {
        let now = self.now();
        self.posts
            .read()
            .get(slug)
            .map(|posts| {
                posts
                    .iter()
                    .filter(|p| p.is_published(now))
                    .filter(|p| p.published_at.is_some_and(|at| range.matches(&at)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn find_page(&self, slug: &str, parent: Option<PageId>) -> Option<Arc<Page>> {
        let now = self.now();
        let pages = self.pages.read();
        pages
            .values()
            .find(|p| {
                p.slug == slug && p.parent == parent && Self::is_page_published(&pages, p, now)
            })
            .cloned()
    }

    fn find_category(&self, slug: &str) -> Option<Arc<Category>> {
        self.categories.read().get(slug).cloned()
    }

    fn find_tags(&self, slugs: &[&str]) -> Option<Vec<Arc<Tag>>> {
        let tags = self.tags.read();
        slugs
            .iter()
            .map(|slug| tags.get(*slug).cloned())
            .collect()
    }

    fn find_author(&self, username: &str) -> Option<Arc<Author>> {
        self.authors.read().get(username).cloned()
    }

    fn recent_published_posts(&self, limit: usize) -> Vec<Arc<Post>> {
        let now = self.now();
        let mut posts: Vec<Arc<Post>> = self
            .posts
            .read()
            .values()
            .flatten()
            .filter(|p| p.is_published(now))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        posts.truncate(limit);
        posts
    }
}
