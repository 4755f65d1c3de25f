//! `[rss]` section configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Values accepted by `sy:updatePeriod`.
const UPDATE_PERIODS: [&str; 5] = ["hourly", "daily", "weekly", "monthly", "yearly"];

/// Feed channel settings.
///
/// The first five keys are required by the feed builder; an empty value is
/// reported as a missing field when the feed is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RssConfig {
    /// Channel link (site home page).
    pub home_url: String,
    /// Channel language, e.g. "en-EN".
    pub language: String,
    /// Contact email for `managingEditor` / `webMaster`.
    pub contact: String,
    /// Author name paired with `contact`.
    pub author: String,
    /// Channel image URL.
    pub image: String,
    /// Feed file name, relative to the output directory and `home_url`.
    pub path: String,
    pub update_period: String,
    pub update_frequency: u32,
    /// Reduce summaries to plain text (tags removed, entities decoded).
    pub strip_html: bool,
    /// Also write each summary as `<content:encoded>`.
    pub content_encoded: bool,
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            home_url: String::new(),
            language: String::new(),
            contact: String::new(),
            author: String::new(),
            image: String::new(),
            path: "feed.xml".into(),
            update_period: "hourly".into(),
            update_frequency: 1,
            strip_html: false,
            content_encoded: false,
        }
    }
}

/// Field paths of the `[rss]` section.
#[derive(Debug, Clone, Copy)]
pub struct RssConfigFields {
    pub home_url: FieldPath,
    pub language: FieldPath,
    pub contact: FieldPath,
    pub author: FieldPath,
    pub image: FieldPath,
    pub path: FieldPath,
    pub update_period: FieldPath,
    pub update_frequency: FieldPath,
}

impl RssConfig {
    pub const FIELDS: RssConfigFields = RssConfigFields {
        home_url: FieldPath::new("rss.home_url"),
        language: FieldPath::new("rss.language"),
        contact: FieldPath::new("rss.contact"),
        author: FieldPath::new("rss.author"),
        image: FieldPath::new("rss.image"),
        path: FieldPath::new("rss.path"),
        update_period: FieldPath::new("rss.update_period"),
        update_frequency: FieldPath::new("rss.update_frequency"),
    };

    /// Validate value formats.
    ///
    /// Blank required keys are left to the feed builder, which names the
    /// first missing one.
    ///
    /// # Checks
    /// - `home_url` and `image` are absolute http(s) URLs with a host
    /// - `path` is a relative file name
    /// - `update_period` is a syndication period, `update_frequency` ≥ 1
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_url(&self.home_url, Self::FIELDS.home_url, diag);
        check_url(&self.image, Self::FIELDS.image, diag);

        let path = self.path.trim();
        if path.is_empty() || path.starts_with('/') || path.contains("..") {
            diag.error_with_hint(
                Self::FIELDS.path,
                format!("'{}' is not a relative file name", self.path),
                "use a name like \"feed.xml\"",
            );
        }

        if !UPDATE_PERIODS.contains(&self.update_period.as_str()) {
            diag.error_with_hint(
                Self::FIELDS.update_period,
                format!("unknown update period '{}'", self.update_period),
                format!("use one of: {}", UPDATE_PERIODS.join(", ")),
            );
        }

        if self.update_frequency == 0 {
            diag.error(
                Self::FIELDS.update_frequency,
                "update frequency must be at least 1",
            );
        }
    }
}

/// URL format check using url crate for strict validation.
fn check_url(value: &str, field: FieldPath, diag: &mut ConfigDiagnostics) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    match url::Url::parse(value) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                diag.error_with_hint(
                    field,
                    format!(
                        "scheme '{}' not supported, must be http or https",
                        parsed.scheme()
                    ),
                    "use format like https://example.com",
                );
            }
            if parsed.host_str().is_none() {
                diag.error_with_hint(
                    field,
                    "URL must have a valid host",
                    "use format like https://example.com",
                );
            }
        }
        Err(e) => {
            diag.error_with_hint(
                field,
                format!("invalid URL: {e}"),
                "use format like https://example.com",
            );
        }
    }
}
