//! Subcommands of the `siteconf` binary.

pub mod args;
pub mod check;
pub mod init;
pub mod show;

pub use args::{CheckArgs, Cli, Commands};

use anyhow::{Context, Result};
use siteconf::{SiteConfig, config::find_config_file};
use std::path::PathBuf;

/// Locate the config named by `--config` and load it.
///
/// Returns the config together with its absolute path.
pub fn load_config(cli: &Cli) -> Result<(SiteConfig, PathBuf)> {
    let path = find_config_file(&cli.config).with_context(|| {
        format!(
            "config file '{}' not found. Run 'siteconf init' to create one.",
            cli.config.display()
        )
    })?;
    let config = SiteConfig::load(&path)?;
    Ok((config, path))
}
