//! Site configuration management for `site.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── head       # HeadTag descriptors and tag rules
//! ├── sidebar    # sidebar rules, validate_sidebar_paths
//! ├── types/     # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util       # route syntax, config file discovery
//! └── mod.rs     # SiteConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! title = "IMT 549 - Intro to Web Development"
//! description = "Intro to Web Development"
//! base_path = "/coursework/"
//! analytics_id = "UA-116416182-3"
//! head = [["link", { rel = "shortcut icon", href = "/favicon.ico" }]]
//! sidebar = ["/", "/getting-setup", "/managing-files"]
//! ```
//!
//! `base` and `ga` are accepted as aliases of `base_path` and `analytics_id`.

pub mod head;
pub mod sidebar;
pub mod types;
mod util;

pub use head::{AttrValue, HeadTag};
pub use sidebar::{MissingPageError, ValidateLevel, validate_sidebar_paths};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::{RouteIssue, check_route, find_config_file, find_config_file_from};

use crate::pages::ContentPages;
use macros::Config;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Default config filename
pub const CONFIG_FILE: &str = "site.toml";

/// Table that older site configs nested theme keys under.
const LEGACY_SECTION: &str = "themeConfig";

fn default_base_path() -> String {
    "/".to_string()
}

// ============================================================================
// root configuration
// ============================================================================

/// Site configuration: metadata, head tags, analytics and sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Config)]
#[config(section = "")]
pub struct SiteConfig {
    /// Site title, shown in the browser tab and the navbar.
    #[config(default = "My Course")]
    pub title: String,

    /// Site description, used for the description meta tag.
    #[serde(default)]
    pub description: String,

    /// URL prefix of every generated page. Must start and end with `/`.
    #[serde(default = "default_base_path", alias = "base")]
    #[config(default = "/")]
    pub base_path: String,

    /// Extra elements for every page's head, as [tag, {attrs}] or [tag, {attrs}, content].
    #[serde(
        default,
        deserialize_with = "head::deserialize_lenient",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub head: Vec<HeadTag>,

    /// Analytics tracking id. Analytics is disabled when unset.
    #[serde(default, alias = "ga", skip_serializing_if = "Option::is_none")]
    pub analytics_id: Option<String>,

    /// Sidebar pages, in display order.
    #[config(default = "[\"/\"]")]
    pub sidebar: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            base_path: default_base_path(),
            head: Vec::new(),
            analytics_id: None,
            sidebar: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load and validate the configuration file at `path`.
    ///
    /// Warnings (unknown keys, malformed `head`, duplicate sidebar entries)
    /// are printed; any rule violation fails the load.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, diag) = Self::parse_checked(&content)?;

        // Show only the file name, the path is already known to the user
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        diag.print_warnings(&display_path);

        crate::debug!("config"; "loaded {} ({} sidebar entries)", display_path, config.sidebar.len());
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let (config, diag) = Self::parse_checked(content)?;
        diag.print_warnings(CONFIG_FILE);
        Ok(config)
    }

    /// Parse, normalize and validate, returning the non-fatal diagnostics.
    ///
    /// Fails with `ConfigError::Toml` on bad syntax or shape and with
    /// `ConfigError::Diagnostics` when any field rule is violated, or when a
    /// required key only appears under `[themeConfig]`.
    pub fn parse_checked(content: &str) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let raw: toml::Table = toml::from_str(content)?;
        Self::check_legacy_section(&raw)?;
        let (mut config, ignored) = Self::parse_with_ignored(content)?;

        let mut diag = ConfigDiagnostics::new();
        for field in ignored {
            diag.unknown_field(field);
        }
        if let Some(head) = raw.get(Self::FIELDS.head.as_str()) {
            head::check_shape(head, &mut diag);
        }

        config.normalize();
        config.validate(&mut diag);

        if diag.has_errors() {
            return Err(ConfigError::Diagnostics(diag));
        }
        Ok((config, diag))
    }

    /// Catch required keys that only exist under `[themeConfig]`.
    fn check_legacy_section(raw: &toml::Table) -> Result<(), ConfigError> {
        let Some(nested) = raw.get(LEGACY_SECTION).and_then(toml::Value::as_table) else {
            return Ok(());
        };

        let mut diag = ConfigDiagnostics::new();
        for field in [Self::FIELDS.title, Self::FIELDS.sidebar] {
            let key = field.as_str();
            if !raw.contains_key(key) && nested.contains_key(key) {
                diag.error_with_hint(
                    field,
                    format!("missing field `{key}`, found `{LEGACY_SECTION}.{key}`"),
                    format!("move `{key}` out of [{LEGACY_SECTION}] to the top level"),
                );
            }
        }

        if diag.has_errors() {
            return Err(ConfigError::Diagnostics(diag));
        }
        Ok(())
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), toml::de::Error> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Apply defaulting that serde can't express.
    fn normalize(&mut self) {
        if self
            .analytics_id
            .as_deref()
            .is_some_and(|id| id.trim().is_empty())
        {
            self.analytics_id = None;
        }
    }

    /// Check every field rule, collecting all violations.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error(Self::FIELDS.title, "title must not be empty");
        }

        if let Err(issue) = check_route(&self.base_path, true) {
            diag.error_with_hint(
                Self::FIELDS.base_path,
                format!("'{}' {issue}", self.base_path),
                "use a path like \"/\" or \"/coursework/\"",
            );
        }

        head::validate(&self.head, diag);
        sidebar::validate(&self.sidebar, diag);
    }

    /// Serialize to canonical TOML. Reloading the output yields an equal config.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    pub fn analytics_enabled(&self) -> bool {
        self.analytics_id.is_some()
    }

    /// Public URL of a sidebar entry under `base_path`.
    ///
    /// # Example
    /// ```ignore
    /// // base_path = "/coursework/"
    /// config.page_url("/getting-setup") -> "/coursework/getting-setup"
    /// config.page_url("/")              -> "/coursework/"
    /// ```
    pub fn page_url(&self, entry: &str) -> String {
        let base = self.base_path.trim_end_matches('/');
        let entry = entry.strip_prefix('/').unwrap_or(entry);
        format!("{base}/{entry}")
    }

    /// See [`validate_sidebar_paths`].
    pub fn validate_sidebar_paths(&self, pages: &ContentPages) -> Result<(), MissingPageError> {
        validate_sidebar_paths(self, pages)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with the required `title` and `sidebar` fields filled in.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("title = \"Test\"\nsidebar = [\"/\"]\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
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
