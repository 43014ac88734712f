//! Error types for Brevis operations.
//!
//! This module defines the main error type [`BrevisError`] which represents
//! every terminal failure of a summarization request: invalid input, failed
//! extraction, too little usable text, and failed summarization.
//!
//! # Example
//!
//! ```rust
//! use brevis_core::{BrevisError, ExtractionErrorKind, Result};
//!
//! fn require_content(text: &str) -> Result<&str> {
//!     if text.is_empty() {
//!         return Err(BrevisError::extraction(ExtractionErrorKind::NoContent));
//!     }
//!     Ok(text)
//! }
//! ```

use thiserror::Error;

/// Category of an extraction failure.
///
/// Callers can tell these apart to decide what to show the user, e.g. a
/// timeout is not worth suggesting the primary extraction tier for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionErrorKind {
    /// The remote side took longer than the configured timeout.
    Timeout,
    /// The host could not be reached at all.
    Connection,
    /// The server answered with a non-2xx status.
    HttpStatus { status: u16, reason: String },
    /// The scraping service reported a failure of its own.
    Service(String),
    /// A response arrived but carried no usable content.
    NoContent,
    /// Anything else (body decoding, malformed payloads, ...).
    Generic(String),
}

impl std::fmt::Display for ExtractionErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timeout - the website took too long to respond"),
            Self::Connection => write!(f, "connection error - unable to reach the website"),
            Self::HttpStatus { status, reason } => write!(f, "HTTP error {} - {}", status, reason),
            Self::Service(reason) => write!(f, "scraping service failed: {}", reason),
            Self::NoContent => write!(f, "no content could be extracted from the page"),
            Self::Generic(reason) => write!(f, "error extracting content: {}", reason),
        }
    }
}

/// Main error type for Brevis operations.
///
/// # Example
///
/// ```rust
/// use brevis_core::BrevisError;
///
/// let err = BrevisError::InsufficientContent { length: 42, minimum: 100 };
/// assert!(err.is_insufficient_content());
/// ```
#[derive(Error, Debug)]
pub enum BrevisError {
    /// The input is not an absolute URL with scheme and host.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Content extraction failed with a classified cause.
    #[error("Extraction failed: {kind}")]
    ExtractionFailed { kind: ExtractionErrorKind },

    /// Extraction completed but produced too little text to summarize.
    ///
    /// This implies every tier ran without a hard error.
    #[error("Insufficient content: extracted {length} characters, need more than {minimum}")]
    InsufficientContent { length: usize, minimum: usize },

    /// The text-generation call failed after successful extraction.
    #[error("Error generating summary: {0}")]
    SummarizationFailed(String),

    /// A mandatory configuration value is absent.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),
}

impl BrevisError {
    /// Shorthand for [`BrevisError::ExtractionFailed`].
    pub fn extraction(kind: ExtractionErrorKind) -> Self {
        Self::ExtractionFailed { kind }
    }

    /// Returns the extraction category if this is an extraction failure.
    pub fn extraction_kind(&self) -> Option<&ExtractionErrorKind> {
        match self {
            Self::ExtractionFailed { kind } => Some(kind),
            _ => None,
        }
    }

    pub fn is_insufficient_content(&self) -> bool {
        matches!(self, Self::InsufficientContent { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.extraction_kind(), Some(ExtractionErrorKind::Timeout))
    }
}

/// Transport errors from reqwest are classified into extraction categories.
impl From<reqwest::Error> for BrevisError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ExtractionErrorKind::Timeout
        } else if err.is_connect() {
            ExtractionErrorKind::Connection
        } else if let Some(status) = err.status() {
            ExtractionErrorKind::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }
        } else {
            ExtractionErrorKind::Generic(err.to_string())
        };
        Self::ExtractionFailed { kind }
    }
}

/// Result type alias for BrevisError.
///
/// This is a convenience alias for `std::result::Result<T, BrevisError>`.
pub type Result<T> = std::result::Result<T, BrevisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BrevisError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_http_status_display() {
        let err = BrevisError::extraction(ExtractionErrorKind::HttpStatus {
            status: 404,
            reason: "Not Found".to_string(),
        });
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn test_insufficient_content_error() {
        let err = BrevisError::InsufficientContent { length: 50, minimum: 100 };
        assert!(err.is_insufficient_content());
        assert!(err.extraction_kind().is_none());
        assert!(err.to_string().contains("50"));
    }

    #[test]
    fn test_timeout_detection() {
        let err = BrevisError::extraction(ExtractionErrorKind::Timeout);
        assert!(err.is_timeout());
        assert!(!BrevisError::extraction(ExtractionErrorKind::Connection).is_timeout());
    }

    #[test]
    fn test_summarization_not_extraction() {
        let err = BrevisError::SummarizationFailed("model overloaded".to_string());
        assert!(err.extraction_kind().is_none());
        assert!(!err.is_insufficient_content());
    }
}
