//! `siteconf check`: config rules plus sidebar page resolution.

use anyhow::{Context, Result};
use siteconf::{ContentPages, SiteConfig, ValidateLevel, debug, log, utils::plural_count};
use std::path::{Path, PathBuf};

use super::CheckArgs;

/// Check sidebar entries against the pages found in the content directory.
///
/// The config itself was already validated by loading it.
pub fn check_site(config: &SiteConfig, config_path: &Path, args: &CheckArgs) -> Result<()> {
    let content_dir = resolve_content_dir(config_path, args.content.as_deref());
    let pages = ContentPages::scan(&content_dir)
        .with_context(|| format!("failed to scan '{}'", content_dir.display()))?;

    log!(
        "check";
        "found {} in {}",
        plural_count(pages.len(), "page"),
        content_dir.display()
    );
    debug_config(config);

    let level = if args.warn_only {
        ValidateLevel::Warn
    } else {
        ValidateLevel::Error
    };

    match config.validate_sidebar_paths(&pages) {
        Ok(()) => {
            log!(
                "check";
                "all {} resolve",
                plural_count(config.sidebar.len(), "sidebar link")
            );
            Ok(())
        }
        Err(missing) => {
            missing.print();
            match level {
                ValidateLevel::Warn => Ok(()),
                ValidateLevel::Error => Err(missing.into()),
            }
        }
    }
}

/// `--content` with `~` expanded, or the directory holding the config file.
fn resolve_content_dir(config_path: &Path, content: Option<&Path>) -> PathBuf {
    match content {
        Some(dir) => {
            let expanded = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
            PathBuf::from(expanded)
        }
        None => config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    }
}

fn debug_config(config: &SiteConfig) {
    debug!("check"; "base path {}", config.base_path);
    match &config.analytics_id {
        Some(id) => debug!("check"; "analytics enabled ({id})"),
        None => debug!("check"; "analytics disabled"),
    }
    for tag in &config.head {
        debug!("head"; "{}", tag.to_html());
    }
}
