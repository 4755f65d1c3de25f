//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// RSS 2.0 feed builder for static sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, default_value = "sitefeed.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the feed and write it to the output directory
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Check config and content without writing anything
    #[command(visible_alias = "v")]
    Validate {
        #[command(flatten)]
        args: ValidateArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Content manifest (JSON array of records)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub content: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Minify the feed XML
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,
}

/// Validate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Content manifest (JSON array of records)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub content: Option<PathBuf>,

    /// Report skipped records as warnings instead of failing
    #[arg(long, short = 'w')]
    pub warn_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args() {
        let cli = Cli::parse_from(["sitefeed", "build", "-c", "pages.json", "--minify"]);
        assert_eq!(cli.config, PathBuf::from("sitefeed.toml"));
        match cli.command {
            Commands::Build { args } => {
                assert_eq!(args.content, Some(PathBuf::from("pages.json")));
                assert_eq!(args.output, None);
                assert_eq!(args.minify, Some(true));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_minify_explicit_false() {
        let cli = Cli::parse_from(["sitefeed", "b", "--minify", "false"]);
        match cli.command {
            Commands::Build { args } => assert_eq!(args.minify, Some(false)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_validate_args_and_globals() {
        let cli = Cli::parse_from(["sitefeed", "-C", "site/feed.toml", "validate", "-w", "-v"]);
        assert_eq!(cli.config, PathBuf::from("site/feed.toml"));
        assert!(cli.verbose);
        match cli.command {
            Commands::Validate { args } => assert!(args.warn_only),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
