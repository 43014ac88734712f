//! Article extraction and summarization request shaping.
//!
//! A URL is validated, its main content is extracted (Firecrawl first when a
//! key is configured, then selector heuristics on the raw HTML), and the text
//! is turned into a bounded, length-specific chat prompt for a summarizer.

pub mod cleanup;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod firecrawl;
pub mod groq;
pub mod heuristic;
pub mod parse;
pub mod pipeline;
pub mod preprocess;
pub mod summarize;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use cleanup::{clean_body_text, collapse_whitespace, normalize_markdown, strip_boilerplate};
pub use config::{Config, ConfigBuilder, DefaultOrchestrator};
pub use error::{BrevisError, ExtractionErrorKind, Result};
pub use extract::{Extraction, ExtractionMethod, ExtractionOutcome, Extractor, Orchestrator};
pub use fetch::FetchConfig;
pub use firecrawl::{FirecrawlConfig, FirecrawlExtractor};
pub use groq::{GroqClient, GroqConfig, Summarizer};
pub use heuristic::{HeuristicExtractor, extract_from_html};
pub use parse::Document;
pub use pipeline::{Digest, Pipeline};
pub use summarize::{ChatMessage, Role, SummarizationRequest, SummaryLength};
pub use validate::{is_valid_url, parse_url};
