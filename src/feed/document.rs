//! In-memory feed document and its RSS 2.0 serialization.
//!
//! # Output Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:sy="...">
//!   <channel>
//!     <title>Site</title>
//!     <atom:link href="https://example.com/feed.xml" rel="self" type="application/rss+xml"/>
//!     <link>https://example.com</link>
//!     ...
//!     <item>
//!       <title>Post</title>
//!       <link>https://example.com/post/</link>
//!       <guid isPermaLink="true">https://example.com/post/</guid>
//!       <pubDate>Mon, 15 Jan 2024 00:00:00 +0000</pubDate>
//!       ...
//!     </item>
//!   </channel>
//! </rss>
//! ```

use crate::utils::date::DateTimeUtc;
use quick_xml::escape::escape;
use std::borrow::Cow;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const SY_NS: &str = "http://purl.org/rss/1.0/modules/syndication/";
const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";

/// Channel metadata plus items, alive for one build call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub channel: Channel,
    /// Items in output order (newest first).
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub link: String,
    /// Absolute URL of the feed itself (`atom:link rel="self"`).
    pub self_link: String,
    pub description: String,
    pub last_build_date: Option<DateTimeUtc>,
    pub language: String,
    pub generator: String,
    pub update_period: String,
    pub update_frequency: u32,
    /// `contact (author)`; also used for `webMaster`.
    pub managing_editor: String,
    pub image: Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    pub title: String,
    pub link: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    /// Absolute URL; doubles as the permalink guid.
    pub link: String,
    pub pub_date: DateTimeUtc,
    pub author: String,
    pub description: String,
    /// Written as `<content:encoded>` when present.
    pub content: Option<String>,
}

impl FeedDocument {
    /// Serialize as a complete RSS 2.0 document with a UTF-8 prolog.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(1024 + self.items.len() * 512);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<rss version=\"2.0\" xmlns:atom=\"");
        xml.push_str(ATOM_NS);
        xml.push_str("\" xmlns:sy=\"");
        xml.push_str(SY_NS);
        if self.items.iter().any(|item| item.content.is_some()) {
            xml.push_str("\" xmlns:content=\"");
            xml.push_str(CONTENT_NS);
        }
        xml.push_str("\">\n");
        xml.push_str("  <channel>\n");

        self.channel.write(&mut xml);
        for item in &self.items {
            item.write(&mut xml);
        }

        xml.push_str("  </channel>\n");
        xml.push_str("</rss>\n");
        xml
    }
}

impl Channel {
    fn write(&self, xml: &mut String) {
        const INDENT: usize = 4;

        push_element(xml, INDENT, "title", &self.title);
        push_indent(xml, INDENT);
        xml.push_str("<atom:link href=\"");
        push_text(xml, &self.self_link);
        xml.push_str("\" rel=\"self\" type=\"application/rss+xml\"/>\n");
        push_element(xml, INDENT, "link", &self.link);
        push_element(xml, INDENT, "description", &self.description);
        if let Some(date) = self.last_build_date {
            push_element(xml, INDENT, "lastBuildDate", &date.to_rfc822());
        }
        push_element(xml, INDENT, "language", &self.language);
        push_element(xml, INDENT, "generator", &self.generator);
        push_element(xml, INDENT, "sy:updatePeriod", &self.update_period);
        push_element(
            xml,
            INDENT,
            "sy:updateFrequency",
            &self.update_frequency.to_string(),
        );
        push_element(xml, INDENT, "managingEditor", &self.managing_editor);
        push_element(xml, INDENT, "webMaster", &self.managing_editor);

        push_indent(xml, INDENT);
        xml.push_str("<image>\n");
        push_element(xml, INDENT + 2, "url", &self.image.url);
        push_element(xml, INDENT + 2, "title", &self.image.title);
        push_element(xml, INDENT + 2, "link", &self.image.link);
        push_element(xml, INDENT + 2, "width", &self.image.width.to_string());
        push_element(xml, INDENT + 2, "height", &self.image.height.to_string());
        push_indent(xml, INDENT);
        xml.push_str("</image>\n");
    }
}

impl Item {
    fn write(&self, xml: &mut String) {
        const INDENT: usize = 6;

        push_indent(xml, INDENT - 2);
        xml.push_str("<item>\n");
        push_element(xml, INDENT, "title", &self.title);
        push_element(xml, INDENT, "link", &self.link);
        push_indent(xml, INDENT);
        xml.push_str("<guid isPermaLink=\"true\">");
        push_text(xml, &self.link);
        xml.push_str("</guid>\n");
        push_element(xml, INDENT, "pubDate", &self.pub_date.to_rfc822());
        push_element(xml, INDENT, "author", &self.author);
        push_element(xml, INDENT, "description", &self.description);
        if let Some(content) = &self.content {
            push_element(xml, INDENT, "content:encoded", content);
        }
        push_indent(xml, INDENT - 2);
        xml.push_str("</item>\n");
    }
}

/// Write `<name>text</name>` on its own line, escaping `text`.
fn push_element(xml: &mut String, indent: usize, name: &str, text: &str) {
    push_indent(xml, indent);
    xml.push('<');
    xml.push_str(name);
    xml.push('>');
    push_text(xml, text);
    xml.push_str("</");
    xml.push_str(name);
    xml.push_str(">\n");
}

/// Append escaped character data, dropping characters XML 1.0 forbids.
fn push_text(xml: &mut String, text: &str) {
    xml.push_str(&escape(strip_invalid_chars(text)));
}

fn strip_invalid_chars(text: &str) -> Cow<'_, str> {
    let is_invalid =
        |c: char| (c < ' ' && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{FFFE}' | '\u{FFFF}');

    if text.contains(is_invalid) {
        Cow::Owned(text.chars().filter(|&c| !is_invalid(c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

#[inline]
fn push_indent(xml: &mut String, indent: usize) {
    xml.extend(std::iter::repeat_n(' ', indent));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> Channel {
        Channel {
            title: "Site".into(),
            link: "https://example.com".into(),
            self_link: "https://example.com/feed.xml".into(),
            description: "About things".into(),
            last_build_date: None,
            language: "en-EN".into(),
            generator: "sitefeed".into(),
            update_period: "hourly".into(),
            update_frequency: 1,
            managing_editor: "me@example.com (Me)".into(),
            image: Image {
                url: "https://example.com/logo.png".into(),
                title: "Site".into(),
                link: "https://example.com".into(),
                width: 32,
                height: 32,
            },
        }
    }

    fn item(title: &str) -> Item {
        Item {
            title: title.into(),
            link: "https://example.com/post/?a=1&b=2".into(),
            pub_date: DateTimeUtc::new(2024, 1, 15, 10, 30, 45),
            author: "me@example.com (Me)".into(),
            description: "<p>summary</p>".into(),
            content: None,
        }
    }

    #[test]
    fn test_empty_document_structure() {
        let doc = FeedDocument {
            channel: channel(),
            items: vec![],
        };
        let xml = doc.to_xml();

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with(r#"<rss version="2.0""#));
        assert_eq!(lines[2], "  <channel>");
        assert_eq!(lines.last().copied(), Some("</rss>"));
        assert!(!xml.contains("<item>"));
        assert!(!xml.contains("<lastBuildDate>"));
    }

    #[test]
    fn test_channel_elements() {
        let xml = FeedDocument {
            channel: channel(),
            items: vec![],
        }
        .to_xml();

        assert!(xml.contains("    <title>Site</title>\n"));
        assert!(xml.contains(
            r#"<atom:link href="https://example.com/feed.xml" rel="self" type="application/rss+xml"/>"#
        ));
        assert!(xml.contains("<link>https://example.com</link>"));
        assert!(xml.contains("<language>en-EN</language>"));
        assert!(xml.contains("<managingEditor>me@example.com (Me)</managingEditor>"));
        assert!(xml.contains("<webMaster>me@example.com (Me)</webMaster>"));
        assert!(xml.contains("<sy:updatePeriod>hourly</sy:updatePeriod>"));
        assert!(xml.contains("<sy:updateFrequency>1</sy:updateFrequency>"));
        assert!(xml.contains("      <url>https://example.com/logo.png</url>\n"));
        assert!(xml.contains("      <width>32</width>\n"));
    }

    #[test]
    fn test_last_build_date() {
        let mut channel = channel();
        channel.last_build_date = Some(DateTimeUtc::new(2024, 6, 15, 14, 30, 45));
        let xml = FeedDocument {
            channel,
            items: vec![],
        }
        .to_xml();

        assert!(xml.contains("<lastBuildDate>Sat, 15 Jun 2024 14:30:45 +0000</lastBuildDate>"));
    }

    #[test]
    fn test_item_escaping() {
        let xml = FeedDocument {
            channel: channel(),
            items: vec![item("Tom & \"Jerry\" <'s>")],
        }
        .to_xml();

        assert!(xml.contains("<title>Tom &amp; &quot;Jerry&quot; &lt;&apos;s&gt;</title>"));
        assert!(xml.contains("<link>https://example.com/post/?a=1&amp;b=2</link>"));
        assert!(xml.contains(
            r#"<guid isPermaLink="true">https://example.com/post/?a=1&amp;b=2</guid>"#
        ));
        assert!(xml.contains("<description>&lt;p&gt;summary&lt;/p&gt;</description>"));
        assert!(xml.contains("<pubDate>Mon, 15 Jan 2024 10:30:45 +0000</pubDate>"));
    }

    #[test]
    fn test_control_characters_dropped() {
        let mut entry = item("A\u{1}B\u{1f}");
        entry.description = "line\tone\r\nline\u{b}two\u{c}".into();
        let xml = FeedDocument {
            channel: channel(),
            items: vec![entry],
        }
        .to_xml();

        assert!(xml.contains("<title>AB</title>"));
        assert!(xml.contains("<description>line\tone\r\nlinetwo</description>"));
        assert!(!xml.chars().any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r')));
    }

    #[test]
    fn test_content_encoded() {
        let plain = FeedDocument {
            channel: channel(),
            items: vec![item("Plain")],
        }
        .to_xml();
        assert!(!plain.contains("xmlns:content"));
        assert!(!plain.contains("<content:encoded>"));

        let mut entry = item("Full");
        entry.content = Some("Tom & Jerry".into());
        let xml = FeedDocument {
            channel: channel(),
            items: vec![entry],
        }
        .to_xml();

        assert!(xml.contains(&format!(r#"xmlns:content="{CONTENT_NS}""#)));
        assert!(xml.contains("<content:encoded>Tom &amp; Jerry</content:encoded>"));
        let desc = xml.find("</description>").unwrap();
        let content = xml.find("<content:encoded>").unwrap();
        assert!(desc < content);
    }

    #[test]
    fn test_items_keep_order() {
        let xml = FeedDocument {
            channel: channel(),
            items: vec![item("First"), item("Second")],
        }
        .to_xml();

        let first = xml.find("<title>First</title>").unwrap();
        let second = xml.find("<title>Second</title>").unwrap();
        assert!(first < second);
        assert_eq!(xml.matches("<item>").count(), 2);
        assert_eq!(xml.matches("</item>").count(), 2);
    }
}
