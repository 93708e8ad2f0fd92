//! Configuration section definitions.

mod site;
mod urls;

pub use site::SiteInfoConfig;
pub use urls::{
    ArchiveConfig, AuthorConfig, CategoryConfig, RssConfig, TagConfig, UrlsConfig,
};
