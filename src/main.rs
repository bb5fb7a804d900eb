//! siteconf - check and inspect a documentation site's `site.toml`.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    siteconf::logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Init { dry } => cli::init::new_config(&cli, *dry),
        Commands::Check { args } => {
            let (config, path) = cli::load_config(&cli)?;
            cli::check::check_site(&config, &path, args)
        }
        Commands::Show { json } => {
            let (config, _) = cli::load_config(&cli)?;
            cli::show::show_config(&config, *json)
        }
    }
}
