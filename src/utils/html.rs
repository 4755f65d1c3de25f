//! HTML utility functions.

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

/// Remove HTML tags from a fragment, keeping the text between them.
///
/// Entities are left untouched; see [`html_to_text`] to decode them.
///
/// # Example
/// ```
/// use sitefeed::utils::html::strip_tags;
///
/// assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
/// assert_eq!(strip_tags("plain"), "plain"); // No allocation
/// ```
pub fn strip_tags(s: &str) -> Cow<'_, str> {
    static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

    if !s.contains('<') {
        return Cow::Borrowed(s);
    }
    RE_TAG.replace_all(s, "")
}

/// Plain text of an HTML fragment: tags removed, entities decoded.
///
/// A fragment with a malformed entity (a bare `&`, an unknown name) keeps
/// its entities as written.
pub fn html_to_text(html: &str) -> Cow<'_, str> {
    let stripped = strip_tags(html);
    if !stripped.contains('&') {
        return stripped;
    }

    let decoded = unescape_with(&stripped, resolve_html5_entity).map(Cow::into_owned);
    match decoded {
        Ok(text) => Cow::Owned(text),
        Err(_) => stripped,
    }
}
