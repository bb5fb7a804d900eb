//! Sidebar entries and page resolution.
//!
//! The sidebar is the ordered list of page paths shown as site navigation.
//! Order is kept exactly as written. Each entry must be a root-relative path
//! (resolved under `base_path` by the site generator).

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::SiteConfig;
use super::types::{ConfigDiagnostic, ConfigDiagnostics};
use super::util::{RouteIssue, check_route};
use crate::pages::{ContentPages, route_key};
use crate::utils::plural_s;

/// Check entry syntax and report duplicates.
pub(super) fn validate(sidebar: &[String], diag: &mut ConfigDiagnostics) {
    let field = SiteConfig::FIELDS.sidebar;

    if sidebar.is_empty() {
        diag.warn(field, "sidebar is empty, navigation will be blank");
        return;
    }

    let mut seen = FxHashSet::default();
    for (i, entry) in sidebar.iter().enumerate() {
        if let Err(issue) = check_route(entry, false) {
            let mut error = ConfigDiagnostic::new(field, format!("'{entry}' {issue}")).at(i);
            if issue == RouteIssue::NoLeadingSlash {
                error = error.with_hint(format!("write it as '/{entry}'"));
            }
            diag.push_error(error);
            continue;
        }

        if !seen.insert(route_key(entry)) {
            diag.push_warning(
                ConfigDiagnostic::new(field, format!("'{entry}' appears more than once")).at(i),
            );
        }
    }
}

// ============================================================================
// Page resolution
// ============================================================================

/// Sidebar entries that point at no known content page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct MissingPageError {
    /// One entry per missing page, in sidebar order, spelled as first written.
    pub missing: Vec<String>,
}

impl fmt::Display for MissingPageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sidebar entr{} with no matching page: {}",
            self.missing.len(),
            if self.missing.len() == 1 { "y" } else { "ies" },
            self.missing.join(", ")
        )
    }
}

/// How a caller treats unresolved sidebar entries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidateLevel {
    /// Unresolved entries fail the run.
    #[default]
    Error,
    /// Unresolved entries are reported and the run continues.
    Warn,
}

/// Report every sidebar entry with no page in `pages`.
///
/// Entries are matched by route key, so `/a`, `/a/`, `/a.md` and `/a.html`
/// all resolve to the same page and a missing page is reported once.
pub fn validate_sidebar_paths(
    config: &SiteConfig,
    pages: &ContentPages,
) -> Result<(), MissingPageError> {
    let mut reported = FxHashSet::default();
    let missing: Vec<String> = config
        .sidebar
        .iter()
        .filter(|entry| !pages.contains(entry))
        .filter(|entry| reported.insert(route_key(entry)))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        crate::debug!(
            "sidebar";
            "{} of {} entr{} unresolved",
            missing.len(),
            config.sidebar.len(),
            if config.sidebar.len() == 1 { "y" } else { "ies" }
        );
        Err(MissingPageError { missing })
    }
}

impl MissingPageError {
    /// Print the missing entries as a warning block.
    pub fn print(&self) {
        crate::log!(
            "warning";
            "{} missing page{}:",
            self.missing.len(),
            plural_s(self.missing.len())
        );
        for entry in &self.missing {
            eprintln!("- {entry}");
        }
    }
}

// ============================================================================
// tests
// ============================================================================
