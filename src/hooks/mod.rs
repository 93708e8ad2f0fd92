//! Plugin hook registry.
//!
//! The surrounding application registers callbacks against named events; the
//! platform invokes them in registration order. Two callback shapes exist:
//!
//! - **Filters** take the content string and return a (possibly modified)
//!   replacement; each registered filter sees the previous filter's output.
//! - **Actions** observe a post (e.g. after it is published) and return
//!   nothing.
//!
//! The route classifier never calls into hooks - resolution stays a pure
//! computation. Hooks fire from content rendering and store writes only.

use parking_lot::RwLock;

use crate::content::Post;

/// Hook events the platform fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// Filter: raw Markdown before rendering.
    PreRenderContent,
    /// Filter: HTML after rendering.
    PostRenderContent,
    /// Action: a post was inserted with published status.
    PostSavePost,
}

type FilterFn = dyn Fn(String) -> String + Send + Sync;
type ActionFn = dyn Fn(&Post) + Send + Sync;

/// Ordered list of (event, callback) pairs.
#[derive(Default)]
pub struct HookRegistry {
    filters: RwLock<Vec<(HookEvent, Box<FilterFn>)>>,
    actions: RwLock<Vec<(HookEvent, Box<ActionFn>)>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a content filter for an event.
    pub fn register_filter<F>(&self, event: HookEvent, f: F)
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.filters.write().push((event, Box::new(f)));
    }

    /// Register an action for an event.
    pub fn register_action<F>(&self, event: HookEvent, f: F)
    where
        F: Fn(&Post) + Send + Sync + 'static,
    {
        self.actions.write().push((event, Box::new(f)));
    }

    /// Run all filters registered for `event` over `content`, in
    /// registration order. Returns the input unchanged if none match.
    pub fn apply_filters(&self, event: HookEvent, content: String) -> String {
        let filters = self.filters.read();
        filters
            .iter()
            .filter(|(e, _)| *e == event)
            .fold(content, |acc, (_, f)| f(acc))
    }

    /// Run all actions registered for `event`, in registration order.
    pub fn run_actions(&self, event: HookEvent, post: &Post) {
        let actions = self.actions.read();
        for (e, f) in actions.iter() {
            if *e == event {
                f(post);
            }
        }
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("filters", &self.filters.read().len())
            .field("actions", &self.actions.read().len())
            .finish()
    }
}
