//! Content records and per-record validation.
//!
//! A record that lacks a title, a usable URL or a publish date is not an
//! error for the build: it is left out of the feed and reported as a
//! [`SkippedItem`] so the host can log it.

use crate::utils::date::{DateError, DateTimeUtc};
use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;
use url::{ParseError, Url};

/// One page of site content, as handed over by the host.
///
/// `title` and `url` may be blank and `published_at` absent, so that a
/// broken page can be reported instead of rejected up front.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContentRecord {
    /// Host-side identifier (e.g. source path), used in diagnostics.
    pub id: Option<String>,
    pub title: String,
    /// Absolute URL, or a permalink relative to the channel home.
    #[serde(alias = "permalink")]
    pub url: String,
    #[serde(alias = "date", deserialize_with = "lenient_date")]
    pub published_at: Option<DateTimeUtc>,
    #[serde(alias = "excerpt")]
    pub summary: String,
    pub author: Option<String>,
}

impl ContentRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>, published_at: DateTimeUtc) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            published_at: Some(published_at),
            ..Self::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Best available name for this record: id, then url, then title.
    fn identifier(&self, index: usize) -> String {
        [self.id.as_deref(), Some(self.url.as_str()), Some(self.title.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map_or_else(|| format!("#{index}"), str::to_string)
    }
}

/// Unparseable dates become `None` and surface as a skipped record.
fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTimeUtc>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(DateTimeUtc::parse))
}

/// Why a record was left out of the feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing title")]
    MissingTitle,
    #[error("missing url")]
    MissingUrl,
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("missing or unparseable publish date")]
    MissingDate,
    #[error("invalid publish date: {0}")]
    InvalidDate(#[from] DateError),
}

/// Diagnostic for a record excluded from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// Position of the record in the input sequence.
    pub index: usize,
    /// Record id, url or title (first non-empty), or `#index`.
    pub record: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`: {}", self.record, self.reason)
    }
}

/// A record that passed validation, with its resolved link.
#[derive(Debug)]
pub(crate) struct ValidRecord<'a> {
    pub record: &'a ContentRecord,
    pub link: String,
    pub published_at: DateTimeUtc,
}

/// Check required fields; the first missing one is reported.
pub(crate) fn validate<'a>(
    record: &'a ContentRecord,
    index: usize,
    home_url: &str,
) -> Result<ValidRecord<'a>, SkippedItem> {
    let skip = |reason| SkippedItem {
        index,
        record: record.identifier(index),
        reason,
    };

    if record.title.trim().is_empty() {
        return Err(skip(SkipReason::MissingTitle));
    }
    let link = resolve_link(&record.url, home_url).map_err(skip)?;
    let published_at = record.published_at.ok_or_else(|| skip(SkipReason::MissingDate))?;
    published_at
        .validate()
        .map_err(|err| skip(SkipReason::InvalidDate(err)))?;

    Ok(ValidRecord {
        record,
        link,
        published_at,
    })
}

/// Resolve a record URL to the absolute link written into the feed.
///
/// Absolute URLs are kept verbatim; permalinks are joined to `home_url`.
fn resolve_link(raw: &str, home_url: &str) -> Result<String, SkipReason> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SkipReason::MissingUrl);
    }

    let invalid = |reason: String| SkipReason::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let (link, parsed) = match Url::parse(raw) {
        Ok(parsed) => (raw.to_string(), parsed),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let link = format!(
                "{}/{}",
                home_url.trim_end_matches('/'),
                raw.trim_start_matches('/')
            );
            let parsed = Url::parse(&link).map_err(|e| invalid(e.to_string()))?;
            (link, parsed)
        }
        Err(e) => return Err(invalid(e.to_string())),
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("scheme '{}' not supported", parsed.scheme())));
    }

    Ok(link)
}
