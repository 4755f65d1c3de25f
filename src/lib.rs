//! sitefeed - RSS 2.0 feeds for static sites.
//!
//! Turns a list of [`ContentRecord`]s plus channel settings ([`FeedConfig`])
//! into an RSS 2.0 document. Records without a title, link or publish date
//! are reported as [`SkippedItem`]s instead of failing the build.
//!
//! The `sitefeed` binary wraps this with a `sitefeed.toml` config and a JSON
//! content manifest; see [`cli`] and [`config`].

pub mod cli;
pub mod config;
pub mod feed;
pub mod logger;
pub mod utils;

pub use config::ConfigError;
pub use feed::{
    FeedBuilder, FeedConfig, FeedOutput, build,
    check::{FeedError, check_feed},
    clock::{Clock, FixedClock, SystemClock},
    document::FeedDocument,
    minify_xml,
    record::{ContentRecord, SkipReason, SkippedItem},
};
pub use utils::date::DateTimeUtc;
