//! `siteconf show`: print the loaded config.

use anyhow::Result;
use siteconf::SiteConfig;

pub fn show_config(config: &SiteConfig, json: bool) -> Result<()> {
    print!("{}", render(config, json)?);
    Ok(())
}

fn render(config: &SiteConfig, json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(config)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(config.to_toml_string()?)
    }
}
