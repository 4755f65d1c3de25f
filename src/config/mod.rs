//! Site configuration management for `sitefeed.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [site], [rss], [build]
//! ├── types/         # ConfigError, diagnostics, FieldPath
//! ├── util.rs        # config file lookup
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Notes"
//! description = "Things I wrote down"
//!
//! [rss]
//! home_url = "https://example.com"
//! language = "en-EN"
//! contact = "me@example.com"
//! author = "Me"
//! image = "https://example.com/logo.png"
//!
//! [build]
//! content = "content.json"
//! output = "dist"
//! ```

pub mod section;
pub mod types;
mod util;

pub use section::{BuildConfig, RssConfig, SiteInfoConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::{find_config_file, find_config_file_from};

use crate::{
    cli::{Cli, Commands},
    feed::FeedConfig,
    log,
};
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing sitefeed.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteInfoConfig,

    #[serde(default)]
    pub rss: RssConfig,

    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file; relative paths in
    /// `[build]` (and their CLI overrides) resolve against its directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = find_config_file(&cli.config).ok_or_else(|| {
            anyhow!(
                "config file '{}' not found in this directory or any parent",
                cli.config.display()
            )
        })?;

        let mut config = Self::from_path(&config_path)?;
        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.config_path = config_path;

        config.apply_command_options(cli);
        config.normalize_paths();
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path, warning about unknown fields.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Validate value formats across sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.rss.validate(&mut diag);
        diag.into_result()
    }

    /// Channel settings for the feed builder.
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            home_url: self.rss.home_url.clone(),
            language: self.rss.language.clone(),
            contact: self.rss.contact.clone(),
            author: self.rss.author.clone(),
            image_url: self.rss.image.clone(),
            title: self.site.title.clone(),
            description: self.site.description.clone(),
            path: self.rss.path.clone(),
            update_period: self.rss.update_period.clone(),
            update_frequency: self.rss.update_frequency,
            strip_html: self.rss.strip_html,
            content_encoded: self.rss.content_encoded,
            ..FeedConfig::default()
        }
    }

    /// Where the feed file is written.
    pub fn output_path(&self) -> PathBuf {
        self.build.output.join(self.rss.path.trim_start_matches('/'))
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { args } => {
                Self::update_option(&mut self.build.content, args.content.as_ref());
                Self::update_option(&mut self.build.output, args.output.as_ref());
                Self::update_option(&mut self.build.minify, args.minify.as_ref());
            }
            Commands::Validate { args } => {
                Self::update_option(&mut self.build.content, args.content.as_ref());
            }
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve `[build]` paths against the project root.
    fn normalize_paths(&mut self) {
        self.build.content = self.root.join(&self.build.content);
        self.build.output = self.root.join(&self.build.output);
    }
}

#[cfg(test)]
pub(crate) fn test_parse_config(content: &str) -> SiteConfig {
    SiteConfig::parse(content).expect("valid test config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const FULL: &str = r#"
[site]
title = "Notes"
description = "Things I wrote down"

[rss]
home_url = "https://example.com/"
language = "en-EN"
contact = "me@example.com"
author = "Me"
image = "https://example.com/logo.png"
path = "rss.xml"

[build]
content = "public/content.json"
output = "public"
minify = true
"#;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.rss.path, "feed.xml");
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.build.content, PathBuf::from("content.json"));
        assert!(!config.build.minify);
        assert!(config.site.title.is_empty());
    }

    #[test]
    fn test_parse_full() {
        let config = test_parse_config(FULL);
        assert_eq!(config.site.title, "Notes");
        assert_eq!(config.rss.home_url, "https://example.com/");
        assert_eq!(config.rss.image, "https://example.com/logo.png");
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert!(config.build.minify);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_type_error() {
        let err = SiteConfig::parse("[rss]\nupdate_frequency = \"often\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_feed_config_mapping() {
        let feed = test_parse_config(FULL).feed_config();
        assert_eq!(feed.home_url, "https://example.com/");
        assert_eq!(feed.image_url, "https://example.com/logo.png");
        assert_eq!(feed.title, "Notes");
        assert_eq!(feed.description, "Things I wrote down");
        assert_eq!(feed.self_link(), "https://example.com/rss.xml");
        assert!(feed.validate().is_ok());
    }

    #[test]
    fn test_missing_rss_field_surfaces_from_builder() {
        let config = test_parse_config(&FULL.replace("contact = \"me@example.com\"\n", ""));
        // Format checks pass; the builder names the blank field.
        assert!(config.validate().is_ok());
        let err = config.feed_config().validate().unwrap_err();
        assert_eq!(err.missing_field(), Some(RssConfig::FIELDS.contact));
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (config, ignored) =
            SiteConfig::parse_with_ignored("[rss]\nhome_url = \"https://x.dev\"\ncolour = 1\n[extra]\na = 1")
                .unwrap();
        assert_eq!(config.rss.home_url, "https://x.dev");
        assert_eq!(ignored, vec!["rss.colour".to_string(), "extra".to_string()]);
    }

    #[test]
    fn test_validate_reports_bad_urls() {
        let config = test_parse_config("[rss]\nhome_url = \"example.com\"");
        match config.validate() {
            Err(ConfigError::Diagnostics(diag)) => {
                assert_eq!(diag.len(), 1);
                assert_eq!(diag.errors()[0].field, RssConfig::FIELDS.home_url);
            }
            other => panic!("expected diagnostics, got {other:?}"),
        }
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteConfig::from_path(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_load_resolves_paths_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("sitefeed.toml");
        fs::write(&config_path, FULL).unwrap();

        let cli = Cli::parse_from([
            "sitefeed",
            "-C",
            config_path.to_str().unwrap(),
            "build",
            "--output",
            "out",
        ]);
        let config = SiteConfig::load(&cli).unwrap();

        assert_eq!(config.root, dir.path());
        assert_eq!(config.build.content, dir.path().join("public/content.json"));
        assert_eq!(config.build.output, dir.path().join("out"));
        assert_eq!(config.output_path(), dir.path().join("out/rss.xml"));
    }
}
