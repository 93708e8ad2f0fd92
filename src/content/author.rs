//! Author entity.

use serde::{Deserialize, Serialize};

/// A post author, matched by the author index route on the username slug.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    /// Username slug used in URLs.
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    /// Display name: first + last name when available, falling back to the
    /// first name alone, then the username.
    pub fn display_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            _ => self.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_full() {
        let author = Author {
            username: "jdoe".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        };
        assert_eq!(author.display_name(), "Jane Doe");
    }

    #[test]
    fn test_display_name_first_only() {
        let author = Author {
            username: "jdoe".to_string(),
            first_name: "Jane".to_string(),
            last_name: String::new(),
        };
        assert_eq!(author.display_name(), "Jane");
    }

    #[test]
    fn test_display_name_username_fallback() {
        let author = Author::new("jdoe");
        assert_eq!(author.display_name(), "jdoe");
    }
}
