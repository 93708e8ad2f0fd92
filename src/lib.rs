//! Quillpress - URL pattern resolution engine for a configurable content
//! platform.
//!
//! Maps incoming request paths to content resolutions: a single post, a
//! hierarchical page, or one of several paginated index views (date
//! archive, category, tag, author, RSS). Path structure is not fixed: site
//! operators configure prefix templates (e.g. a post prefix of
//! `{{ year }}/{{ month }}/{{ day }}` or the empty string) combined with
//! slugs, dates, category/tag/author identifiers, and arbitrary-depth page
//! hierarchies. The same literal path can be ambiguous across content
//! types, so classification applies a deterministic priority order:
//! rss > post > archive > category > tag > author > page.
//!
//! # Example
//!
//! ```
//! use quillpress::config::PlatformConfig;
//! use quillpress::content::{InMemoryStore, Post, PostStatus};
//! use quillpress::route::{Resolution, RouteRequest, RouteTable};
//! use quillpress::utils::date::DateTimeUtc;
//!
//! let config = PlatformConfig::default();
//! let table = RouteTable::compile(&config.urls).unwrap();
//!
//! let store = InMemoryStore::with_clock(DateTimeUtc::from_ymd(2024, 6, 15));
//! store
//!     .insert_post(Post {
//!         title: "Hello".into(),
//!         slug: "hello".into(),
//!         status: PostStatus::Published,
//!         published_at: Some(DateTimeUtc::from_ymd(2024, 1, 5)),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//! let request = RouteRequest::new("/2024/01/05/hello/");
//! match table.classify(&request, &store) {
//!     Resolution::Post(post) => assert_eq!(post.slug, "hello"),
//!     other => panic!("unexpected resolution: {}", other.kind()),
//! }
//! ```
//!
//! Classification is a pure computation over an immutable [`RouteTable`]
//! plus read-only store lookups; tables are rebuilt as a unit on
//! configuration reload and swapped atomically (see
//! [`config::Snapshot`]).

pub mod config;
pub mod content;
pub mod core;
pub mod feed;
pub mod hooks;
pub mod logger;
pub mod route;
pub mod urls;
pub mod utils;

pub use crate::config::{PlatformConfig, Snapshot};
pub use crate::content::{ContentQueries, InMemoryStore};
pub use crate::core::UrlPath;
pub use crate::route::{Resolution, RouteRequest, RouteTable};
