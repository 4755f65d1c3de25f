//! Dry-run validation: config, manifest and generated feed, no output written.

use super::common::{build_from_config, plural_count, report_skipped};
use crate::{cli::ValidateArgs, config::SiteConfig, feed::check::check_feed, log};
use anyhow::{Result, bail};

/// Build the feed in memory and report what would be published.
///
/// Fails when any record is skipped, unless `--warn-only` is set.
pub fn validate_feed(config: &SiteConfig, args: &ValidateArgs) -> Result<()> {
    let output = build_from_config(config, false)?;
    report_skipped(&output.skipped);
    check_feed(&output.xml)?;

    let skipped = output.skipped.len();
    log!(
        "validate";
        "{} ok, {} skipped",
        plural_count(output.items, "item"),
        skipped
    );

    if skipped > 0 && !args.warn_only {
        bail!(
            "{} in {} would be left out of the feed",
            plural_count(skipped, "record"),
            config.build.content.display()
        );
    }
    Ok(())
}
