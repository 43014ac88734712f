//! Primary extraction through the Firecrawl scrape API.
//!
//! Firecrawl renders the page (running its scripts) and returns the main
//! content as markdown, which copes with sites the heuristic tier cannot read.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::cleanup::normalize_markdown;
use crate::extract::{Extraction, Extractor};
use crate::parse::Document;
use crate::{BrevisError, ExtractionErrorKind, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.firecrawl.dev";

/// Tags Firecrawl should keep when isolating the main content.
pub const INCLUDE_TAGS: &[&str] = &["title", "h1", "h2", "h3", "p", "article"];

/// Tags Firecrawl should drop before producing output.
pub const EXCLUDE_TAGS: &[&str] = &["nav", "footer", "header", "aside", "script", "style"];

const FORMATS: &[&str] = &["markdown", "html"];

/// Settings for the Firecrawl client. The API key is passed separately.
#[derive(Debug, Clone)]
pub struct FirecrawlConfig {
    /// Base URL of the API.
    pub endpoint: String,
    /// How long Firecrawl waits for dynamic content to settle, in milliseconds.
    pub wait_for_ms: u64,
    /// Firecrawl's own render timeout, in milliseconds.
    pub timeout_ms: u64,
    /// Timeout of the HTTP call to Firecrawl, in seconds.
    pub http_timeout: u64,
}

impl Default for FirecrawlConfig {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_string(), wait_for_ms: 3_000, timeout_ms: 30_000, http_timeout: 45 }
    }
}

/// Body of a `POST /v1/scrape` call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest<'a> {
    pub url: &'a str,
    pub formats: &'a [&'a str],
    pub only_main_content: bool,
    pub include_tags: &'a [&'a str],
    pub exclude_tags: &'a [&'a str],
    pub wait_for: u64,
    pub timeout: u64,
}

impl<'a> ScrapeRequest<'a> {
    pub fn new(url: &'a str, config: &FirecrawlConfig) -> Self {
        Self {
            url,
            formats: FORMATS,
            only_main_content: true,
            include_tags: INCLUDE_TAGS,
            exclude_tags: EXCLUDE_TAGS,
            wait_for: config.wait_for_ms,
            timeout: config.timeout_ms,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    pub data: Option<ScrapeData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeData {
    pub title: Option<String>,
    pub markdown: Option<String>,
    pub content: Option<String>,
    pub html: Option<String>,
    pub metadata: Option<ScrapeMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeMetadata {
    pub title: Option<String>,
}

/// Extractor backed by the Firecrawl API.
#[derive(Debug, Clone)]
pub struct FirecrawlExtractor {
    client: Client,
    api_key: String,
    config: FirecrawlConfig,
}

impl FirecrawlExtractor {
    pub fn new(api_key: impl Into<String>, config: FirecrawlConfig) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(config.http_timeout)).build()?;
        Ok(Self { client, api_key: api_key.into(), config })
    }

    fn scrape_url(&self) -> String {
        format!("{}/v1/scrape", self.config.endpoint.trim_end_matches('/'))
    }
}

impl Extractor for FirecrawlExtractor {
    async fn extract(&self, url: &Url) -> Result<Extraction> {
        let request = ScrapeRequest::new(url.as_str(), &self.config);
        debug!(url = %url, endpoint = %self.config.endpoint, "requesting firecrawl scrape");

        let response = self
            .client
            .post(self.scrape_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ScrapeResponse = response.json().await?;
        extraction_from_response(body)
    }
}

/// Turns a scrape response into an extraction.
///
/// Content preference: `markdown`, then `content`, then the text of `html`.
///
/// # Errors
///
/// [`ExtractionErrorKind::Service`] when Firecrawl reports failure or sends no
/// data, [`ExtractionErrorKind::NoContent`] when every content field is empty.
pub fn extraction_from_response(response: ScrapeResponse) -> Result<Extraction> {
    if !response.success {
        let reason = response.error.unwrap_or_else(|| "Unknown error".to_string());
        return Err(BrevisError::extraction(ExtractionErrorKind::Service(reason)));
    }

    let Some(data) = response.data else {
        return Err(BrevisError::extraction(ExtractionErrorKind::Service(
            "response contained no data".to_string(),
        )));
    };

    let title = non_empty(data.title).or_else(|| non_empty(data.metadata.and_then(|m| m.title)));

    let raw = non_empty(data.markdown)
        .or_else(|| non_empty(data.content))
        .or_else(|| non_empty(data.html).and_then(|html| Document::parse(&html).body_text()));

    let content = raw.map(|text| normalize_markdown(&text)).unwrap_or_default();
    if content.is_empty() {
        return Err(BrevisError::extraction(ExtractionErrorKind::NoContent));
    }

    Ok(Extraction { title, content })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
