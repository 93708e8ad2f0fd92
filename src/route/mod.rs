//! URL Pattern Resolution Engine.
//!
//! Maps request paths to content resolutions: a single post, a hierarchical
//! page, or one of the paginated index views (date archive, category, tag,
//! author, RSS).
//!
//! # Module Structure
//!
//! - [`pattern`]: Pattern Compiler - prefix templates -> [`PatternSpec`]
//! - [`table`]: [`RouteTable`] - compiled snapshot of all enabled matchers
//! - [`classify`]: Route Classifier - priority dispatch
//! - [`result`]: [`Resolution`] tagged union
//! - [`tags`]: Tag-Set Parser
//! - [`hierarchy`]: Page Hierarchy Resolver
//! - [`disambiguate`]: Post Disambiguator
//!
//! # Usage
//!
//! ```ignore
//! let table = RouteTable::compile(&config.urls)?;
//! let request = RouteRequest::new("/2024/01/hello/");
//! match table.classify(&request, &store) {
//!     Resolution::Post(post) => ...,
//!     Resolution::NotFound => ...,
//!     ...
//! }
//! ```

mod classify;
mod disambiguate;
mod hierarchy;
mod pattern;
mod result;
mod table;
mod tags;

pub use classify::RouteRequest;
pub use disambiguate::disambiguate;
pub use hierarchy::resolve_page_path;
pub use pattern::{DateFieldSet, PatternSpec, TemplateError, Token};
pub use result::Resolution;
pub use table::RouteTable;
pub use tags::{TagSet, parse_tag_set};
