//! `[build]` section configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the feed is read from and written to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory; the feed lands at `output/<rss.path>`.
    pub output: PathBuf,
    /// JSON content manifest produced by the site generator.
    pub content: PathBuf,
    /// Collapse indentation in the written feed.
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            content: "content.json".into(),
            minify: false,
        }
    }
}
