//! Runtime configuration: credentials, endpoints and timeouts.
//!
//! The Firecrawl key is optional and acts as the switch for the primary
//! extraction tier. The Groq key is only required once a summary is wanted.
//!
//! # Example
//!
//! ```rust
//! use brevis_core::Config;
//!
//! let config = Config::builder()
//!     .groq_api_key("gsk-...")
//!     .fetch_timeout(10)
//!     .build();
//! assert!(!config.has_primary());
//! ```

use crate::extract::Orchestrator;
use crate::fetch::FetchConfig;
use crate::firecrawl::{FirecrawlConfig, FirecrawlExtractor};
use crate::groq::{GroqClient, GroqConfig};
use crate::heuristic::HeuristicExtractor;
use crate::{BrevisError, Result};

pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const FIRECRAWL_API_KEY: &str = "FIRECRAWL_API_KEY";
pub const MODEL_VAR: &str = "BREVIS_MODEL";
pub const FIRECRAWL_URL_VAR: &str = "FIRECRAWL_API_URL";
pub const GROQ_URL_VAR: &str = "GROQ_BASE_URL";

/// The orchestrator wired with the real extractors.
pub type DefaultOrchestrator = Orchestrator<FirecrawlExtractor, HeuristicExtractor>;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub firecrawl_api_key: Option<String>,
    pub fetch: FetchConfig,
    pub firecrawl: FirecrawlConfig,
    pub groq: GroqConfig,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Reads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`; blank values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut builder = ConfigBuilder::new();
        if let Some(key) = get(GROQ_API_KEY) {
            builder = builder.groq_api_key(key);
        }
        if let Some(key) = get(FIRECRAWL_API_KEY) {
            builder = builder.firecrawl_api_key(key);
        }
        if let Some(model) = get(MODEL_VAR) {
            builder = builder.model(model);
        }
        if let Some(endpoint) = get(FIRECRAWL_URL_VAR) {
            builder = builder.firecrawl_endpoint(endpoint);
        }
        if let Some(endpoint) = get(GROQ_URL_VAR) {
            builder = builder.groq_endpoint(endpoint);
        }
        builder.build()
    }

    /// Whether the primary extraction tier is available.
    pub fn has_primary(&self) -> bool {
        self.firecrawl_api_key.is_some()
    }

    /// Builds the extraction orchestrator, with a primary tier only if a
    /// Firecrawl key is configured.
    pub fn orchestrator(&self) -> Result<DefaultOrchestrator> {
        let primary = match &self.firecrawl_api_key {
            Some(key) => Some(FirecrawlExtractor::new(key.clone(), self.firecrawl.clone())?),
            None => None,
        };
        let fallback = HeuristicExtractor::new(&self.fetch)?;
        Ok(Orchestrator::new(primary, fallback))
    }

    /// Builds the summarization client.
    ///
    /// # Errors
    ///
    /// [`BrevisError::MissingConfig`] when no Groq key is configured.
    pub fn summarizer(&self) -> Result<GroqClient> {
        let key = self
            .groq_api_key
            .as_deref()
            .ok_or_else(|| BrevisError::MissingConfig(format!("{} is not set", GROQ_API_KEY)))?;
        GroqClient::new(key, self.groq.clone())
    }
}

/// Builder for [`Config`].
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self { config: Config::default() }
    }

    pub fn groq_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.groq_api_key = Some(key.into());
        self
    }

    pub fn firecrawl_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.firecrawl_api_key = Some(key.into());
        self
    }

    /// Sets the text-generation model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.groq.model = model.into();
        self
    }

    pub fn temperature(mut self, value: f32) -> Self {
        self.config.groq.temperature = value;
        self
    }

    /// Sets the heuristic tier's HTTP timeout in seconds.
    pub fn fetch_timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.fetch.user_agent = agent.into();
        self
    }

    pub fn firecrawl_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.firecrawl.endpoint = endpoint.into();
        self
    }

    pub fn groq_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.groq.endpoint = endpoint.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.groq_api_key.is_none());
        assert!(!config.has_primary());
        assert_eq!(config.fetch.timeout, 15);
        assert_eq!(config.groq.model, "llama3-8b-8192");
        assert_eq!(config.firecrawl.timeout_ms, 30_000);
    }

    #[test]
    fn test_from_lookup() {
        let config = Config::from_lookup(lookup(&[
            (GROQ_API_KEY, "gsk-1"),
            (FIRECRAWL_API_KEY, "fc-1"),
            (MODEL_VAR, "llama-3.1-8b-instant"),
        ]));

        assert_eq!(config.groq_api_key.as_deref(), Some("gsk-1"));
        assert!(config.has_primary());
        assert_eq!(config.groq.model, "llama-3.1-8b-instant");
    }

    #[test]
    fn test_blank_values_are_absent() {
        let config = Config::from_lookup(lookup(&[(GROQ_API_KEY, "  "), (FIRECRAWL_API_KEY, "")]));
        assert!(config.groq_api_key.is_none());
        assert!(!config.has_primary());
    }

    #[test]
    fn test_orchestrator_without_key_has_no_primary() {
        let config = Config::builder().build();
        assert!(!config.orchestrator().unwrap().has_primary());

        let config = Config::builder().firecrawl_api_key("fc-1").build();
        assert!(config.orchestrator().unwrap().has_primary());
    }

    #[test]
    fn test_summarizer_requires_key() {
        let err = Config::default().summarizer().unwrap_err();
        assert!(matches!(err, BrevisError::MissingConfig(_)));

        let client = Config::builder().groq_api_key("gsk").model("m").build().summarizer().unwrap();
        assert_eq!(client.model(), "m");
    }
}
