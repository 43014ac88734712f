//! End-to-end flow: validate, extract, check, shape the request, summarize.

use serde::Serialize;
use tracing::info;

use crate::Result;
use crate::config::{Config, DefaultOrchestrator};
use crate::extract::{ExtractionMethod, Extractor, Orchestrator};
use crate::firecrawl::FirecrawlExtractor;
use crate::groq::{GroqClient, Summarizer};
use crate::heuristic::HeuristicExtractor;
use crate::summarize::{SummarizationRequest, SummaryLength};
use crate::validate::parse_url;

/// The result of summarizing one URL.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub url: String,
    pub title: Option<String>,
    pub summary: String,
    pub method: ExtractionMethod,
    /// Length of the extracted content in characters, before truncation.
    pub content_length: usize,
    pub length: SummaryLength,
}

/// Extraction tiers plus a summarizer.
pub struct Pipeline<P, F, S> {
    orchestrator: Orchestrator<P, F>,
    summarizer: S,
}

impl Pipeline<FirecrawlExtractor, HeuristicExtractor, GroqClient> {
    /// Wires the real clients from `config`.
    ///
    /// # Errors
    ///
    /// Fails when the Groq key is missing or a client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let orchestrator: DefaultOrchestrator = config.orchestrator()?;
        Ok(Self::new(orchestrator, config.summarizer()?))
    }
}

impl<P: Extractor, F: Extractor, S: Summarizer> Pipeline<P, F, S> {
    pub fn new(orchestrator: Orchestrator<P, F>, summarizer: S) -> Self {
        Self { orchestrator, summarizer }
    }

    pub fn orchestrator(&self) -> &Orchestrator<P, F> {
        &self.orchestrator
    }

    /// Summarizes the article at `url`.
    ///
    /// # Errors
    ///
    /// In order of the steps: [`crate::BrevisError::InvalidUrl`],
    /// [`crate::BrevisError::ExtractionFailed`],
    /// [`crate::BrevisError::InsufficientContent`],
    /// [`crate::BrevisError::SummarizationFailed`].
    pub async fn run(&self, url: &str, length: SummaryLength) -> Result<Digest> {
        let parsed = parse_url(url)?;

        let outcome = self.orchestrator.extract(&parsed).await;
        let method = outcome.method;
        let extraction = outcome.into_result()?.ensure_sufficient()?;
        let content_length = extraction.content.chars().count();

        let request = SummarizationRequest::build(extraction.title.as_deref(), &extraction.content, length);
        info!(url = %parsed, method = ?method, chars = content_length, truncated = request.is_truncated(), "summarizing");

        let summary = self.summarizer.summarize(&request).await?;

        Ok(Digest { url: parsed.to_string(), title: extraction.title, summary, method, content_length, length })
    }
}
