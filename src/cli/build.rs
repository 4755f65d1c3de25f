//! Feed build command.
//!
//! Pipeline: load manifest -> build -> check -> minify -> write.

use super::common::{build_from_config, plural_count, report_skipped};
use crate::{config::SiteConfig, debug, feed::check::check_feed, feed::minify_xml, log};
use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

/// Build the feed and write it to `output/<rss.path>`.
///
/// Returns the path written.
pub fn build_feed(config: &SiteConfig) -> Result<PathBuf> {
    let output = build_from_config(config, true)?;
    report_skipped(&output.skipped);

    let checked = check_feed(&output.xml)?;
    debug!("rss"; "checked {}", plural_count(checked, "item"));

    let xml = minify_xml(output.xml.as_bytes(), config.build.minify);
    let feed_path = config.output_path();
    if let Some(parent) = feed_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&feed_path, &*xml)
        .with_context(|| format!("Failed to write feed to {}", feed_path.display()))?;

    log!(
        "rss";
        "{} ({})",
        feed_path.file_name().unwrap_or_default().to_string_lossy(),
        plural_count(output.items, "item")
    );
    Ok(feed_path)
}
