//! sitefeed - RSS 2.0 feed builder for static sites.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use sitefeed::{
    cli::{Cli, Commands, build::build_feed, validate::validate_feed},
    config::SiteConfig,
    logger,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_feed(&config).map(|_| ()),
        Commands::Validate { args } => validate_feed(&config, args),
    }
}
