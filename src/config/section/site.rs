//! `[site]` section configuration.

use crate::config::FieldPath;
use serde::{Deserialize, Serialize};

/// Site metadata used for the feed channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title, used as channel and image title.
    pub title: String,
    /// Site description.
    pub description: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SiteInfoConfigFields {
    pub title: FieldPath,
}

impl SiteInfoConfig {
    pub const FIELDS: SiteInfoConfigFields = SiteInfoConfigFields {
        title: FieldPath::new("site.title"),
    };
}
