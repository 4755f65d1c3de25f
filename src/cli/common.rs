//! Common utilities shared across CLI commands.

use crate::{
    config::SiteConfig,
    debug,
    feed::{
        FeedBuilder, FeedOutput,
        clock::SystemClock,
        record::{ContentRecord, SkippedItem},
    },
    log,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Read the content manifest: a JSON array of records.
pub fn load_records(path: &Path) -> Result<Vec<ContentRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read content manifest {}", path.display()))?;
    let records: Vec<ContentRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid content manifest {}", path.display()))?;

    debug!("content"; "loaded {} from {}", plural_count(records.len(), "record"), path.display());
    Ok(records)
}

/// Load the manifest and build the feed for `config`.
///
/// `stamp` adds `<lastBuildDate>` from the system clock.
pub fn build_from_config(config: &SiteConfig, stamp: bool) -> Result<FeedOutput> {
    let records = load_records(&config.build.content)?;
    let feed_config = config.feed_config();

    let builder = FeedBuilder::new(&feed_config);
    let builder = if stamp {
        builder.clock(&SystemClock)
    } else {
        builder
    };
    Ok(builder.build(&records)?)
}

/// Log one line per skipped record.
pub fn report_skipped(skipped: &[SkippedItem]) {
    for item in skipped {
        log!("skip"; "{}", item);
    }
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(0, "item")` -> `"0 items"`
/// - `plural_count(1, "item")` -> `"1 item"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
