//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use siteconf::CONFIG_FILE;
use std::path::PathBuf;

/// Check and inspect a documentation site's `site.toml`
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a commented template config in the current directory
    #[command(visible_alias = "i")]
    Init {
        /// Print the template instead of writing it
        #[arg(short, long)]
        dry: bool,
    },

    /// Validate the config and check sidebar entries against content pages
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },

    /// Print the loaded config in canonical form
    #[command(visible_alias = "s")]
    Show {
        /// Print JSON instead of TOML
        #[arg(short, long)]
        json: bool,
    },
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Content directory holding the Markdown pages (default: the config file's directory)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Treat missing sidebar pages as warnings instead of errors
    #[arg(long, short = 'w')]
    pub warn_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["siteconf", "check", "--warn-only", "-c", "docs"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        match cli.command {
            Commands::Check { args } => {
                assert!(args.warn_only);
                assert_eq!(args.content, Some(PathBuf::from("docs")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["siteconf", "show", "--json", "-C", "conf/site.toml", "-v"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("conf/site.toml"));
        assert!(matches!(cli.command, Commands::Show { json: true }));
    }
}
