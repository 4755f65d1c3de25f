//! Structural check of a serialized feed.
//!
//! Reads the XML back with the `rss` crate and runs its validation
//! (absolute links, RFC 822 dates with matching weekdays, image bounds).

use rss::{Channel, validation::Validate};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed is not readable RSS: {0}")]
    Parse(#[from] rss::Error),

    #[error("RSS validation failed: {0}")]
    Validation(#[from] rss::validation::ValidationError),
}

/// Parse and validate `xml`, returning the number of items.
pub fn check_feed(xml: &str) -> Result<usize, FeedError> {
    let channel = Channel::read_from(xml.as_bytes())?;
    channel.validate()?;
    Ok(channel.items().len())
}
