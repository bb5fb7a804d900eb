//! Typed site configuration for documentation sites.
//!
//! `siteconf` loads `site.toml` (title, description, base path, head tags,
//! analytics id and sidebar) into a validated [`SiteConfig`] and checks the
//! sidebar against the pages that actually exist.
//!
//! ```ignore
//! let config = SiteConfig::load(Path::new("site.toml"))?;
//! let pages = ContentPages::scan(Path::new("docs"))?;
//! if let Err(missing) = config.validate_sidebar_paths(&pages) {
//!     missing.print();
//! }
//! ```
//!
//! The config is an ordinary value: build it once and pass it by reference.

pub mod config;
pub mod logger;
pub mod pages;
pub mod utils;

pub use config::{
    CONFIG_FILE, ConfigError, HeadTag, MissingPageError, SiteConfig, ValidateLevel,
    validate_sidebar_paths,
};
pub use pages::ContentPages;
