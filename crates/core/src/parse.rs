//! HTML parsing and DOM querying.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and navigating the DOM tree using CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use brevis_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let first = doc.select_first("p.content").unwrap();
//! assert_eq!(first.joined_text(), "Paragraph");
//! ```

use scraper::{Html, Selector};

use crate::preprocess::strip_unwanted_elements;

/// A parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string without preprocessing.
    ///
    /// Parsing is lenient; malformed markup still yields a document.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Parses HTML after removing scripts, styles and page chrome.
    ///
    /// See [`crate::preprocess::STRIPPED_TAGS`] for what is removed. The
    /// input is left untouched; a cleaned copy is parsed.
    pub fn parse_with_preprocessing(html: &str) -> Self {
        let cleaned = strip_unwanted_elements(html);
        Self::parse(&cleaned)
    }

    /// Returns the first element matching `selector`.
    ///
    /// An invalid selector matches nothing.
    pub fn select_first(&'_ self, selector: &str) -> Option<Element<'_>> {
        let sel = Selector::parse(selector).ok()?;
        self.html.select(&sel).next().map(|element| Element { element })
    }

    /// Selects every element matching `selector`.
    pub fn select(&'_ self, selector: &str) -> Vec<Element<'_>> {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).map(|element| Element { element }).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Gets the content of the `<title>` element, if present.
    pub fn title(&self) -> Option<String> {
        self.select_first("title").map(|el| el.joined_text())
    }

    /// Gets the text under `<body>`, joined with single spaces.
    pub fn body_text(&self) -> Option<String> {
        self.select_first("body").map(|el| el.joined_text())
    }
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the raw concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text of this element with each text node trimmed, empty
    /// nodes skipped, and the rest joined by a single space.
    pub fn joined_text(&self) -> String {
        self.element
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Test Page</title>
            <script>var tracking = true;</script>
        </head>
        <body>
            <nav>Home | About</nav>
            <h1>Heading</h1>
            <p class="content">Paragraph <em>one</em></p>
            <p class="content">Paragraph 2</p>
        </body>
        </html>
    "#;

    #[test]
    fn test_title() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.title(), Some("Test Page".to_string()));
    }

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML);
        let elements = doc.select("p.content");

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Paragraph one");
        assert_eq!(elements[1].tag_name(), "p");
    }

    #[test]
    fn test_joined_text_uses_single_spaces() {
        let doc = Document::parse("<div><p>  First  </p>\n\n<p>Second</p><span>third</span></div>");
        let div = doc.select_first("div").unwrap();
        assert_eq!(div.joined_text(), "First Second third");
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let doc = Document::parse(SAMPLE_HTML);
        assert!(doc.select("[[invalid").is_empty());
        assert!(doc.select_first("[[invalid").is_none());
    }

    #[test]
    fn test_preprocessing_strips_chrome() {
        let doc = Document::parse_with_preprocessing(SAMPLE_HTML);
        let body = doc.body_text().unwrap();

        assert!(body.contains("Heading"));
        assert!(!body.contains("Home | About"));
        assert!(!body.contains("tracking"));
    }

    #[test]
    fn test_attr() {
        let doc = Document::parse(r#"<meta property="og:title" content="From OG">"#);
        let meta = doc.select_first(r#"[property="og:title"]"#).unwrap();
        assert_eq!(meta.attr("content"), Some("From OG"));
        assert_eq!(meta.tag_name(), "meta");
    }
}
