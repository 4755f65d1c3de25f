//! Configuration section definitions.
//!
//! Each module corresponds to a section in `sitefeed.toml`:
//!
//! | Module  | TOML Section | Purpose                              |
//! |---------|--------------|--------------------------------------|
//! | `build` | `[build]`    | Content manifest, output dir, minify |
//! | `rss`   | `[rss]`      | Feed channel settings                |
//! | `site`  | `[site]`     | Site title and description           |

mod build;
mod rss;
mod site;

pub use build::BuildConfig;
pub use rss::RssConfig;
pub use site::SiteInfoConfig;
