//! Platform configuration management for `quillpress.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── site       # [site]
//! │   └── urls       # [urls] and per-route sub-sections
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Global snapshot handle (arc-swap)
//! └── mod.rs         # PlatformConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section           | Purpose                                         |
//! |-------------------|-------------------------------------------------|
//! | `[site]`          | Site metadata (title, url, feed/listing sizes)  |
//! | `[urls]`          | Post prefix template, `append_slash`            |
//! | `[urls.archive]`  | Date archive route (prefix may be empty)        |
//! | `[urls.category]` | Category index route                            |
//! | `[urls.tag]`      | Tag index route (`+`-joined sets, query cap)    |
//! | `[urls.author]`   | Author index route                              |
//! | `[urls.rss]`      | RSS feed path                                   |
//!
//! Every recognized option has a fixed default; unknown keys are a
//! load-time warning, not a runtime lookup. Validation happens once at
//! load, and the resulting snapshot is immutable until the next reload.

pub mod section;
pub mod types;

// Re-export from section/
pub use section::{
    ArchiveConfig, AuthorConfig, CategoryConfig, RssConfig, SiteInfoConfig, TagConfig, UrlsConfig,
};

// Re-export from types/
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, Snapshot, current, install,
    install_config};

use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing quillpress.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Site metadata
    pub site: SiteInfoConfig,

    /// URL routing settings
    pub urls: UrlsConfig,
}

impl PlatformConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from a file path with unknown field detection.
    ///
    /// Unknown keys are warned about and ignored; validation errors are
    /// fatal (a malformed prefix must never reach request handling).
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Validate the configuration.
    ///
    /// Collects all validation errors and returns them at once; advisory
    /// warnings are printed but never fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.urls.validate(&mut diag);
        self.site.validate(self.urls.rss.enabled, &mut diag);

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_parse_config`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> PlatformConfig {
    let (parsed, ignored) = PlatformConfig::parse_with_ignored(extra).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result = PlatformConfig::from_str("[site\ntitle = \"My Blog\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_validate() {
        let config = PlatformConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = PlatformConfig::parse_with_ignored(content).unwrap();

        // Config should parse successfully
        assert_eq!(config.site.title, "Test");

        // Unknown fields should be collected
        assert!(!ignored.is_empty());
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\ntitle = \"Test\"";
        let (_, ignored) = PlatformConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_template() {
        let config = PlatformConfig {
            urls: UrlsConfig {
                post_prefix: "{{ year }}/{{ year }}".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Diagnostics(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[site]\ntitle = \"Loaded\"\nurl = \"https://example.com\"\n[urls]\npost_prefix = \"blog\""
        )
        .unwrap();

        let config = PlatformConfig::load(file.path()).unwrap();
        assert_eq!(config.site.title, "Loaded");
        assert_eq!(config.urls.post_prefix, "blog");
    }

    #[test]
    fn test_load_missing_file() {
        let result = PlatformConfig::load(Path::new("/nonexistent/quillpress.toml"));
        assert!(result.is_err());
    }
}
