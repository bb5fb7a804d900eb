//! Configuration utility functions.

use crate::utils::decode_route;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Origin used only to let `url` parse a bare path.
const PROBE_ORIGIN: &str = "http://localhost/";

/// Why a root-relative path is not acceptable in `site.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteIssue {
    #[error("is empty")]
    Empty,
    #[error("must start with `/`")]
    NoLeadingSlash,
    #[error("must end with `/`")]
    NoTrailingSlash,
    #[error("contains whitespace")]
    Whitespace,
    #[error("contains a query string or fragment")]
    QueryOrFragment,
    #[error("contains an empty segment (`//`)")]
    EmptySegment,
    #[error("contains a `.` or `..` segment")]
    DotSegment,
    #[error("is not a canonical URL path")]
    NotCanonical,
}

/// Check that `path` is a well-formed, root-relative URL path.
///
/// The path must survive a round trip through the `url` parser unchanged
/// once both sides are percent-decoded. Non-ASCII text is accepted as
/// written or encoded; anything `url` would normalize is rejected.
///
/// # Examples
/// ```ignore
/// check_route("/coursework/", true)    -> Ok(())
/// check_route("/getting-setup", false) -> Ok(())
/// check_route("getting-setup", false)  -> Err(RouteIssue::NoLeadingSlash)
/// check_route("/coursework", true)     -> Err(RouteIssue::NoTrailingSlash)
/// check_route("/日本語", false)          -> Ok(())
/// ```
pub fn check_route(path: &str, trailing_slash: bool) -> Result<(), RouteIssue> {
    if path.is_empty() {
        return Err(RouteIssue::Empty);
    }
    if !path.starts_with('/') {
        return Err(RouteIssue::NoLeadingSlash);
    }
    if path.chars().any(char::is_whitespace) {
        return Err(RouteIssue::Whitespace);
    }
    if path.contains(['?', '#']) {
        return Err(RouteIssue::QueryOrFragment);
    }

    // Skip the leading `/`; a trailing `/` yields one final empty segment.
    let segments: Vec<&str> = path[1..].split('/').collect();
    let last = segments.len() - 1;
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() && i != last {
            return Err(RouteIssue::EmptySegment);
        }
        if matches!(*segment, "." | "..") {
            return Err(RouteIssue::DotSegment);
        }
    }

    let parsed = url::Url::parse(PROBE_ORIGIN)
        .and_then(|origin| origin.join(path))
        .map_err(|_| RouteIssue::NotCanonical)?;
    if decode_route(parsed.path()) != decode_route(path) {
        return Err(RouteIssue::NotCanonical);
    }

    if trailing_slash && !path.ends_with('/') {
        return Err(RouteIssue::NoTrailingSlash);
    }
    Ok(())
}

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/course/guide/   ← cwd
/// /home/user/course/site.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Upward search starting at `start` instead of the current directory.
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.exists())
}

// ============================================================================
// tests
// ============================================================================
