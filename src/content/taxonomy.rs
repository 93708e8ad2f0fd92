//! Category and tag entities.

use serde::{Deserialize, Serialize};

/// A post category, matched by the category index route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Sort key for navigation menus.
    pub menu_order: i32,
}

impl Category {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A post tag. Tags differ from categories in that index paths may name
/// several of them at once (`python+django`), with AND semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tag {
    pub slug: String,
    pub title: String,
}

impl Tag {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
        }
    }
}
