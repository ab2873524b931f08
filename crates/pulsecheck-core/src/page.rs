//! One-pass HTML analysis shared by the collectors.
//!
//! A [`PageSnapshot`] owns everything the collectors need from a page —
//! visible text, anchors, selected meta values, `<time>` datetimes — so
//! the non-`Send` parse tree never crosses an await point.

use std::collections::HashMap;

use scraper::{Html, Selector};

/// A single `<a>` element: its href attribute and visible text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

/// Owned extraction of the parts of a page the collectors look at.
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    /// Whitespace-normalized visible text of the document body.
    pub text: String,
    /// Every anchor in document order; `href` may be empty.
    pub anchors: Vec<Anchor>,
    metas: HashMap<String, String>,
    time_values: Vec<String>,
}

impl PageSnapshot {
    /// Parse an HTML document into an owned snapshot.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        let body_selector = Selector::parse("body").expect("static selector");
        let anchor_selector = Selector::parse("a").expect("static selector");
        let meta_selector = Selector::parse("meta").expect("static selector");
        let time_selector = Selector::parse("time").expect("static selector");

        let text = match document.select(&body_selector).next() {
            Some(body) => normalize_text(body.text()),
            None => normalize_text(document.root_element().text()),
        };

        let anchors = document
            .select(&anchor_selector)
            .map(|element| Anchor {
                href: element.value().attr("href").unwrap_or("").trim().to_string(),
                text: normalize_text(element.text()),
            })
            .collect();

        let mut metas = HashMap::new();
        for element in document.select(&meta_selector) {
            let key = element
                .value()
                .attr("property")
                .or_else(|| element.value().attr("name"));
            if let (Some(key), Some(content)) = (key, element.value().attr("content")) {
                metas
                    .entry(key.trim().to_ascii_lowercase())
                    .or_insert_with(|| content.trim().to_string());
            }
        }

        let time_values = document
            .select(&time_selector)
            .filter_map(|element| element.value().attr("datetime"))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();

        Self {
            text,
            anchors,
            metas,
            time_values,
        }
    }

    /// Look up a meta value by `property` or `name` (case-insensitive).
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metas.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    /// `datetime` attributes of every `<time>` element, in document order.
    pub fn time_datetimes(&self) -> &[String] {
        &self.time_values
    }
}

fn normalize_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let joined = parts.collect::<Vec<_>>().join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <html>
            <head>
                <meta property="article:modified_time" content="2025-06-01T10:00:00Z">
                <meta name="description" content="An example product">
            </head>
            <body>
                <h1>Example   Product</h1>
                <a href="/blog">Our Blog</a>
                <a href="https://github.com/acme/widget">Source</a>
                <a>No href here</a>
                <time datetime="2025-05-20T08:00:00Z">May 20</time>
            </body>
        </html>
    "#;

    #[test]
    fn extracts_normalized_body_text() {
        let snapshot = PageSnapshot::parse(FIXTURE);
        assert!(snapshot.text.contains("Example Product"));
        assert!(snapshot.text.contains("Our Blog"));
    }

    #[test]
    fn extracts_anchors_with_and_without_href() {
        let snapshot = PageSnapshot::parse(FIXTURE);
        assert_eq!(snapshot.anchors.len(), 3);
        assert_eq!(snapshot.anchors[0].href, "/blog");
        assert_eq!(snapshot.anchors[0].text, "Our Blog");
        assert_eq!(snapshot.anchors[2].href, "");
    }

    #[test]
    fn looks_up_meta_by_property_or_name() {
        let snapshot = PageSnapshot::parse(FIXTURE);
        assert_eq!(
            snapshot.meta("article:modified_time"),
            Some("2025-06-01T10:00:00Z")
        );
        assert_eq!(snapshot.meta("DESCRIPTION"), Some("An example product"));
        assert_eq!(snapshot.meta("missing"), None);
    }

    #[test]
    fn collects_time_datetimes() {
        let snapshot = PageSnapshot::parse(FIXTURE);
        assert_eq!(snapshot.time_datetimes(), ["2025-05-20T08:00:00Z"]);
    }

    #[test]
    fn handles_document_without_body() {
        let snapshot = PageSnapshot::parse("just some text");
        assert!(snapshot.text.contains("just some text"));
        assert!(snapshot.anchors.is_empty());
    }
}
