//! `siteconf init`: write a starter `site.toml`.

use anyhow::{Context, Result, bail};
use siteconf::{SiteConfig, log};
use std::{fs, path::Path};

use super::Cli;

/// Write the template next to the current directory, or print it with `--dry`.
pub fn new_config(cli: &Cli, dry: bool) -> Result<()> {
    let content = generate_config_template();
    if dry {
        print!("{content}");
        return Ok(());
    }

    let cwd = std::env::current_dir().context("Failed to get current working directory")?;
    let path = cwd.join(&cli.config);
    write_config(&path, &content)?;
    log!("init"; "created {}", path.display());
    Ok(())
}

/// Generate site.toml content with comments
pub fn generate_config_template() -> String {
    let mut out = format!(
        "# siteconf configuration file (v{})\n\n",
        env!("CARGO_PKG_VERSION")
    );
    out.push_str(&SiteConfig::template_with_header());
    out
}

/// Write a config file, refusing to overwrite an existing one.
fn write_config(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        bail!("'{}' already exists", path.display());
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))
}
