//! Two-tier content extraction.
//!
//! An [`Orchestrator`] tries the primary (rendering service) tier first when
//! one is configured, and falls back to the heuristic tier when the primary
//! errors or returns too little text. Each tier is attempted at most once.

use std::fmt;
use std::future::Future;

use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::{BrevisError, Result};

/// Primary content must be strictly longer than this (after trimming) to be accepted.
pub const MIN_PRIMARY_CONTENT_CHARS: usize = 100;

/// Content shorter than this (after trimming) is not worth summarizing.
pub const MIN_CONTENT_CHARS: usize = 100;

/// Which tier produced the final extraction result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// The Firecrawl rendering service.
    Primary,
    /// Direct fetch plus selector heuristics.
    Fallback,
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "Firecrawl"),
            Self::Fallback => write!(f, "Basic Scraping"),
        }
    }
}

/// Title and text pulled out of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub title: Option<String>,
    pub content: String,
}

impl Extraction {
    pub fn new(title: Option<String>, content: impl Into<String>) -> Self {
        Self { title, content: content.into() }
    }

    /// Length of the trimmed content in characters.
    pub fn content_chars(&self) -> usize {
        self.content.trim().chars().count()
    }

    /// Rejects extractions with fewer than [`MIN_CONTENT_CHARS`] characters.
    ///
    /// # Errors
    ///
    /// Returns [`BrevisError::InsufficientContent`].
    pub fn ensure_sufficient(self) -> Result<Self> {
        let length = self.content_chars();
        if length < MIN_CONTENT_CHARS {
            return Err(BrevisError::InsufficientContent { length, minimum: MIN_CONTENT_CHARS });
        }
        Ok(self)
    }
}

/// A source of extracted page content.
pub trait Extractor {
    /// Extracts title and content from `url`. Called at most once per request.
    fn extract(&self, url: &Url) -> impl Future<Output = Result<Extraction>> + Send;
}

/// The final result of the orchestrated extraction.
///
/// `method` names the last tier attempted, whether it succeeded or not.
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub method: ExtractionMethod,
    pub result: Result<Extraction>,
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> Result<Extraction> {
        self.result
    }
}

/// Progress through the extraction chain.
#[derive(Debug)]
enum Stage {
    NotTried,
    PrimaryUnavailable,
    PrimaryFailed,
    FallbackAttempted(Result<Extraction>),
}

/// Runs the primary tier (if any), then the fallback tier if needed.
///
/// Whether a primary tier exists is decided once at construction.
pub struct Orchestrator<P, F> {
    primary: Option<P>,
    fallback: F,
}

impl<P: Extractor, F: Extractor> Orchestrator<P, F> {
    pub fn new(primary: Option<P>, fallback: F) -> Self {
        Self { primary, fallback }
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Extracts content from `url` using the best available tier.
    pub async fn extract(&self, url: &Url) -> ExtractionOutcome {
        let mut stage = Stage::NotTried;

        loop {
            stage = match stage {
                Stage::NotTried => match &self.primary {
                    None => Stage::PrimaryUnavailable,
                    Some(primary) => match primary.extract(url).await {
                        Ok(extraction) if accepts_primary(&extraction) => {
                            info!(url = %url, chars = extraction.content_chars(), "primary extraction accepted");
                            return ExtractionOutcome { method: ExtractionMethod::Primary, result: Ok(extraction) };
                        }
                        Ok(extraction) => {
                            debug!(url = %url, chars = extraction.content_chars(), "primary content too short");
                            Stage::PrimaryFailed
                        }
                        Err(err) => {
                            warn!(url = %url, error = %err, "primary extraction failed");
                            Stage::PrimaryFailed
                        }
                    },
                },
                Stage::PrimaryUnavailable | Stage::PrimaryFailed => {
                    debug!(url = %url, "running fallback extraction");
                    Stage::FallbackAttempted(self.fallback.extract(url).await)
                }
                Stage::FallbackAttempted(result) => {
                    match &result {
                        Ok(extraction) => info!(url = %url, chars = extraction.content_chars(), "fallback extraction done"),
                        Err(err) => warn!(url = %url, error = %err, "fallback extraction failed"),
                    }
                    return ExtractionOutcome { method: ExtractionMethod::Fallback, result };
                }
            };
        }
    }
}

fn accepts_primary(extraction: &Extraction) -> bool {
    extraction.content_chars() > MIN_PRIMARY_CONTENT_CHARS
}
