//! Global config snapshot with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic replacement. The
//! configuration and the route table compiled from it live in one
//! [`Snapshot`] swapped as a unit: concurrent classifications always see
//! either the fully-old or fully-new compiled set, never a partially
//! rebuilt one.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::config::PlatformConfig;
use crate::config::types::ConfigError;
use crate::route::RouteTable;

/// An immutable configuration snapshot plus its compiled route table.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub config: PlatformConfig,
    pub routes: RouteTable,
}

impl Snapshot {
    /// Validate a configuration and compile its route table.
    ///
    /// A malformed prefix template fails here - at load/reload time - and
    /// must be surfaced immediately, never deferred to the first request.
    pub fn build(config: PlatformConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let routes = RouteTable::compile(&config.urls)?;
        Ok(Self { config, routes })
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        // The built-in defaults always compile
        Self::build(PlatformConfig::default()).expect("default configuration is valid")
    }
}

/// Global snapshot storage.
static SNAPSHOT: LazyLock<ArcSwap<Snapshot>> =
    LazyLock::new(|| ArcSwap::from_pointee(Snapshot::default()));

/// Current snapshot (lock-free read).
#[inline]
pub fn current() -> Arc<Snapshot> {
    SNAPSHOT.load_full()
}

/// Install a pre-built snapshot, atomically replacing the previous one.
pub fn install(snapshot: Snapshot) -> Arc<Snapshot> {
    let arc = Arc::new(snapshot);
    SNAPSHOT.store(Arc::clone(&arc));
    arc
}

/// Build and install a snapshot from a configuration.
///
/// On error the previous snapshot stays in place - readers are never left
/// with a half-applied reload.
pub fn install_config(config: PlatformConfig) -> Result<Arc<Snapshot>, ConfigError> {
    Ok(install(Snapshot::build(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_builds() {
        let snapshot = Snapshot::default();
        assert!(snapshot.config.urls.rss.enabled);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = PlatformConfig::default();
        config.urls.post_prefix = "{{ bogus }}".to_string();
        assert!(Snapshot::build(config).is_err());
    }

    #[test]
    fn test_install_swaps_atomically() {
        let mut config = PlatformConfig::default();
        config.urls.rss.enabled = false;
        config.site.url = Some("https://example.com".to_string());

        let installed = install_config(config).unwrap();
        assert!(!installed.config.urls.rss.enabled);

        let seen = current();
        assert!(!seen.config.urls.rss.enabled);

        // A failed install leaves the previous snapshot visible
        let mut broken = PlatformConfig::default();
        broken.urls.post_prefix = "{{ nope }}".to_string();
        assert!(install_config(broken).is_err());
        assert!(!current().config.urls.rss.enabled);
    }
}
