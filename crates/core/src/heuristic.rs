//! Heuristic extraction: fetch the raw page, then locate title and body with
//! ordered selector tables.
//!
//! This tier needs no external service. It works well on conventional blog
//! and news markup and degrades to "all text under `<body>`" elsewhere.
//!
//! # Example
//!
//! ```rust
//! use brevis_core::heuristic::extract_from_html;
//!
//! let html = r#"<html><head><title>Post</title></head>
//!     <body><article><p>Hello from the article body.</p></article></body></html>"#;
//! let extraction = extract_from_html(html);
//! assert_eq!(extraction.title.as_deref(), Some("Post"));
//! assert_eq!(extraction.content, "Hello from the article body.");
//! ```

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::Result;
use crate::cleanup::{clean_body_text, collapse_whitespace};
use crate::extract::{Extraction, Extractor};
use crate::fetch::{FetchConfig, fetch_html};
use crate::parse::{Document, Element};

/// Title selectors in priority order.
pub const TITLE_SELECTORS: &[&str] = &[
    "title",
    "h1",
    ".post-title",
    ".entry-title",
    ".article-title",
    r#"[property="og:title"]"#,
    ".headline",
    ".page-title",
];

/// Content container selectors in priority order.
pub const CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".post-content",
    ".entry-content",
    ".article-content",
    ".content",
    "main",
    ".post",
    ".blog-post",
    r#"[role="main"]"#,
    ".story-body",
    ".article-body",
    ".post-body",
];

/// A container wins as soon as its text is longer than this many characters.
pub const MIN_CONTAINER_CHARS: usize = 200;

/// Fallback extractor working on the raw HTML of the page.
#[derive(Debug, Clone)]
pub struct HeuristicExtractor {
    client: Client,
}

impl HeuristicExtractor {
    /// Builds the extractor and its HTTP client.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self { client: config.build_client()? })
    }

    /// Uses an existing client, e.g. one shared with other components.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Extractor for HeuristicExtractor {
    async fn extract(&self, url: &Url) -> Result<Extraction> {
        let html = fetch_html(&self.client, url).await?;
        let extraction = extract_from_html(&html);
        debug!(
            url = %url,
            title = ?extraction.title,
            chars = extraction.content_chars(),
            "heuristic extraction finished"
        );
        Ok(extraction)
    }
}

/// Extracts title and cleaned body text from raw HTML.
///
/// Never fails: a page without usable text yields empty or short content,
/// which callers judge with [`Extraction::ensure_sufficient`].
pub fn extract_from_html(html: &str) -> Extraction {
    let doc = Document::parse_with_preprocessing(html);
    let title = find_title(&doc);
    let content = find_body_text(&doc).map(|text| clean_body_text(&text)).unwrap_or_default();

    Extraction { title, content }
}

/// Returns the first non-empty title found via [`TITLE_SELECTORS`].
pub fn find_title(doc: &Document) -> Option<String> {
    TITLE_SELECTORS
        .iter()
        .filter_map(|selector| doc.select_first(selector))
        .map(|el| title_text(&el))
        .find(|title| !title.is_empty())
}

/// `<meta>` elements carry their value in `content`, everything else in text.
///
/// Text nodes are concatenated as-is so inline markup adds no spaces.
fn title_text(el: &Element<'_>) -> String {
    if el.tag_name() == "meta" {
        el.attr("content").map(collapse_whitespace).unwrap_or_default()
    } else {
        collapse_whitespace(&el.text())
    }
}

/// Returns the raw (uncleaned) body text.
///
/// Walks [`CONTENT_SELECTORS`] and stops at the first container with more
/// than [`MIN_CONTAINER_CHARS`] characters. When no container qualifies the
/// last candidate seen is kept only if the whole `<body>` is unavailable.
pub fn find_body_text(doc: &Document) -> Option<String> {
    let mut candidate: Option<String> = None;

    for selector in CONTENT_SELECTORS {
        let Some(el) = doc.select_first(selector) else {
            continue;
        };
        let text = el.joined_text();
        let long_enough = text.chars().count() > MIN_CONTAINER_CHARS;
        candidate = Some(text);
        if long_enough {
            debug!(selector, "content container selected");
            break;
        }
    }

    match candidate {
        Some(text) if text.chars().count() >= MIN_CONTAINER_CHARS => Some(text),
        short => doc.body_text().or(short),
    }
}
