//! RSS 2.0 feed generation.
//!
//! Turns host-provided content records into a feed document:
//!
//! 1. check the channel config (fatal on a blank required field)
//! 2. validate each record, collecting [`SkippedItem`]s
//! 3. order the rest newest first (stable)
//! 4. serialize channel + items
//!
//! The builder is pure: no I/O, no ambient clock. `<lastBuildDate>` is only
//! written when a build date is injected.
//!
//! # Example
//!
//! ```
//! use sitefeed::{ContentRecord, DateTimeUtc, FeedConfig, build};
//!
//! let config = FeedConfig {
//!     title: "Notes".into(),
//!     home_url: "https://example.com".into(),
//!     language: "en-EN".into(),
//!     contact: "me@example.com".into(),
//!     author: "Me".into(),
//!     image_url: "https://example.com/logo.png".into(),
//!     ..FeedConfig::default()
//! };
//! let records = vec![
//!     ContentRecord::new("A", "https://example.com/a", DateTimeUtc::from_ymd(2024, 1, 1)),
//!     ContentRecord::new("B & C", "https://example.com/b", DateTimeUtc::from_ymd(2024, 2, 1)),
//! ];
//!
//! let output = build(&records, &config).unwrap();
//! assert_eq!(output.items, 2);
//! assert!(output.xml.contains("<title>B &amp; C</title>"));
//! ```

pub mod check;
pub mod clock;
pub mod document;
pub mod record;

use crate::{
    config::{ConfigError, FieldPath, RssConfig, SiteInfoConfig},
    utils::{date::DateTimeUtc, html::html_to_text},
};
use clock::Clock;
use document::{Channel, FeedDocument, Image, Item};
use record::{ContentRecord, SkippedItem, ValidRecord};
use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

/// Channel image size, in pixels.
const IMAGE_SIZE: u32 = 32;

/// Everything the builder needs to know about the channel.
///
/// `home_url`, `language`, `contact`, `author`, `image_url` and `title` are
/// required; no defaults are inferred for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub home_url: String,
    pub language: String,
    pub contact: String,
    pub author: String,
    pub image_url: String,
    pub title: String,
    pub description: String,
    /// Feed file name, joined to `home_url` for the self link.
    pub path: String,
    pub update_period: String,
    pub update_frequency: u32,
    /// Reduce summaries to plain text before escaping.
    pub strip_html: bool,
    /// Repeat each summary as `<content:encoded>`.
    pub content_encoded: bool,
    pub generator: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            home_url: String::new(),
            language: String::new(),
            contact: String::new(),
            author: String::new(),
            image_url: String::new(),
            title: String::new(),
            description: String::new(),
            path: "feed.xml".into(),
            update_period: "hourly".into(),
            update_frequency: 1,
            strip_html: false,
            content_encoded: false,
            generator: concat!("sitefeed ", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl FeedConfig {
    /// Fail with the first required field that is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required: [(&str, FieldPath); 6] = [
            (self.home_url.as_str(), RssConfig::FIELDS.home_url),
            (self.language.as_str(), RssConfig::FIELDS.language),
            (self.contact.as_str(), RssConfig::FIELDS.contact),
            (self.author.as_str(), RssConfig::FIELDS.author),
            (self.image_url.as_str(), RssConfig::FIELDS.image),
            (self.title.as_str(), SiteInfoConfig::FIELDS.title),
        ];

        match required.iter().find(|(value, _)| value.trim().is_empty()) {
            Some((_, field)) => Err(ConfigError::MissingField(*field)),
            None => Ok(()),
        }
    }

    /// `contact (author)`, the RSS form of a person.
    pub fn managing_editor(&self) -> String {
        format!("{} ({})", self.contact.trim(), self.author.trim())
    }

    /// Absolute URL the feed will be served from.
    pub fn self_link(&self) -> String {
        format!(
            "{}/{}",
            self.home_url.trim().trim_end_matches('/'),
            self.path.trim().trim_start_matches('/')
        )
    }
}

/// Serialized feed plus the records that were left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedOutput {
    pub xml: String,
    /// Number of `<item>` elements in `xml`.
    pub items: usize,
    /// In input order.
    pub skipped: Vec<SkippedItem>,
}

/// Builds one feed from a config and an optional build date.
#[derive(Debug, Clone)]
pub struct FeedBuilder<'a> {
    config: &'a FeedConfig,
    build_date: Option<DateTimeUtc>,
}

impl<'a> FeedBuilder<'a> {
    pub fn new(config: &'a FeedConfig) -> Self {
        Self {
            config,
            build_date: None,
        }
    }

    /// Emit `<lastBuildDate>` with this instant.
    pub fn build_date(mut self, date: DateTimeUtc) -> Self {
        self.build_date = Some(date);
        self
    }

    /// Emit `<lastBuildDate>` with the clock's current time.
    pub fn clock(self, clock: &impl Clock) -> Self {
        self.build_date(clock.now())
    }

    /// Build the feed XML.
    pub fn build(&self, records: &[ContentRecord]) -> Result<FeedOutput, ConfigError> {
        let (document, skipped) = self.document(records)?;
        Ok(FeedOutput {
            xml: document.to_xml(),
            items: document.items.len(),
            skipped,
        })
    }

    /// Build the in-memory document without serializing it.
    pub fn document(
        &self,
        records: &[ContentRecord],
    ) -> Result<(FeedDocument, Vec<SkippedItem>), ConfigError> {
        self.config.validate()?;

        let home_url = self.config.home_url.trim();
        let mut skipped = Vec::new();
        let mut valid = Vec::with_capacity(records.len());
        for (index, entry) in records.iter().enumerate() {
            match record::validate(entry, index, home_url) {
                Ok(checked) => valid.push(checked),
                Err(skip) => skipped.push(skip),
            }
        }

        // Newest first; `sort_by` is stable so ties keep input order.
        valid.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let document = FeedDocument {
            channel: self.channel(),
            items: valid.iter().map(|record| self.item(record)).collect(),
        };
        Ok((document, skipped))
    }

    fn channel(&self) -> Channel {
        let config = self.config;
        let home_url = config.home_url.trim().to_string();
        let title = config.title.trim().to_string();

        Channel {
            title: title.clone(),
            link: home_url.clone(),
            self_link: config.self_link(),
            description: config.description.trim().to_string(),
            last_build_date: self.build_date,
            language: config.language.trim().to_string(),
            generator: config.generator.clone(),
            update_period: config.update_period.clone(),
            update_frequency: config.update_frequency,
            managing_editor: config.managing_editor(),
            image: Image {
                url: config.image_url.trim().to_string(),
                title,
                link: home_url,
                width: IMAGE_SIZE,
                height: IMAGE_SIZE,
            },
        }
    }

    fn item(&self, valid: &ValidRecord<'_>) -> Item {
        let record = valid.record;
        let description = if self.config.strip_html {
            html_to_text(&record.summary)
        } else {
            Cow::Borrowed(record.summary.as_str())
        };
        let description = description.trim().to_string();

        Item {
            title: record.title.trim().to_string(),
            link: valid.link.clone(),
            pub_date: valid.published_at,
            author: normalize_rss_author(record.author.as_deref(), self.config),
            content: self.config.content_encoded.then(|| description.clone()),
            description,
        }
    }
}

/// Build a feed without `<lastBuildDate>`; output depends only on inputs.
pub fn build(records: &[ContentRecord], config: &FeedConfig) -> Result<FeedOutput, ConfigError> {
    FeedBuilder::new(config).build(records)
}

/// Normalize an item author to RSS format: "email (Name)".
///
/// A record author already in that form is kept, a bare name is paired with
/// the channel contact, and no author falls back to the channel's editor.
fn normalize_rss_author(author: Option<&str>, config: &FeedConfig) -> String {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    match author.map(str::trim).filter(|a| !a.is_empty()) {
        Some(author) if RE_VALID_AUTHOR.is_match(author) => author.to_string(),
        Some(name) => format!("{} ({})", config.contact.trim(), name),
        None => config.managing_editor(),
    }
}

/// Minify XML content if enabled.
///
/// Only whitespace between a closing `>` and the next `<` is dropped, so
/// line breaks inside text nodes survive. Text written by this crate never
/// holds a raw `>`.
pub fn minify_xml(content: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    static RE_BETWEEN_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+<").unwrap());

    if !enabled {
        return Cow::Borrowed(content);
    }
    let xml = String::from_utf8_lossy(content);
    let minified = RE_BETWEEN_TAGS.replace_all(xml.trim(), "><");
    Cow::Owned(minified.into_owned().into_bytes())
}
