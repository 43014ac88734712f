//! Plain HTTP fetching for the heuristic extraction tier.
//!
//! The client is built once with default headers and a timeout, then reused
//! for every request.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;
use url::Url;

use crate::{BrevisError, ExtractionErrorKind, Result};

/// Browser-identifying User-Agent; many sites refuse obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 15, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

impl FetchConfig {
    /// Builds a reusable client carrying this configuration.
    pub fn build_client(&self) -> Result<Client> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|e| BrevisError::extraction(ExtractionErrorKind::Generic(format!("invalid user agent: {}", e))))?;
        headers.insert(USER_AGENT, agent);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(self.timeout))
            .build()?;
        Ok(client)
    }
}

/// Fetches HTML content from a URL.
///
/// Follows redirects and fails on any non-2xx status.
///
/// # Errors
///
/// Transport failures are classified as [`ExtractionErrorKind::Timeout`],
/// [`ExtractionErrorKind::Connection`], [`ExtractionErrorKind::HttpStatus`],
/// or [`ExtractionErrorKind::Generic`].
pub async fn fetch_html(client: &Client, url: &Url) -> Result<String> {
    debug!(url = %url, "fetching page");

    let response = client.get(url.clone()).send().await?.error_for_status()?;
    let status = response.status();
    let content = response.text().await?;

    debug!(url = %url, status = status.as_u16(), bytes = content.len(), "page fetched");
    Ok(content)
}
