//! Text generation through Groq's OpenAI-compatible chat completions API.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::summarize::{ChatMessage, SummarizationRequest};
use crate::{BrevisError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Produces a summary for a prepared request.
pub trait Summarizer {
    fn summarize(&self, request: &SummarizationRequest) -> impl Future<Output = Result<String>> + Send;
}

/// Settings for the Groq client. The API key is passed separately.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// Base URL of the OpenAI-compatible API.
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    /// HTTP timeout in seconds.
    pub timeout: u64,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: 60,
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Chat completion client for Groq.
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    config: GroqConfig,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, config: GroqConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| BrevisError::SummarizationFailed(e.to_string()))?;
        Ok(Self { client, api_key: api_key.into(), config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }
}

impl Summarizer for GroqClient {
    async fn summarize(&self, request: &SummarizationRequest) -> Result<String> {
        let messages = request.messages();
        let body = CompletionRequest { model: &self.config.model, messages: &messages, temperature: self.config.temperature };
        debug!(model = %self.config.model, prompt_chars = messages[1].content.len(), "requesting completion");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| BrevisError::SummarizationFailed(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| BrevisError::SummarizationFailed(e.to_string()))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(BrevisError::SummarizationFailed(format!("HTTP {}: {}", status.as_u16(), detail)));
        }

        let summary = parse_completion(&text)?;
        info!(model = %self.config.model, chars = summary.len(), "summary generated");
        Ok(summary)
    }
}

/// Pulls the first choice's text out of a completion response body.
fn parse_completion(body: &str) -> Result<String> {
    let parsed: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| BrevisError::SummarizationFailed(format!("invalid completion response: {}", e)))?;

    let summary = parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .unwrap_or_default();

    if summary.is_empty() {
        return Err(BrevisError::SummarizationFailed("model returned an empty summary".to_string()));
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SummaryLength;
    use httpmock::prelude::*;
    use serde_json::json;

    fn request() -> SummarizationRequest {
        SummarizationRequest::build(Some("Title"), "Some article content.", SummaryLength::Short)
    }

    #[test]
    fn test_parse_completion() {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "  A short summary.  " } }]
        })
        .to_string();
        assert_eq!(parse_completion(&body).unwrap(), "A short summary.");
    }

    #[test]
    fn test_parse_completion_empty() {
        let err = parse_completion(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, BrevisError::SummarizationFailed(_)));
    }

    #[test]
    fn test_parse_completion_garbage() {
        assert!(matches!(parse_completion("not json"), Err(BrevisError::SummarizationFailed(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let messages = request().messages();
        let body = CompletionRequest { model: DEFAULT_MODEL, messages: &messages, temperature: 0.5 };
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["model"], "llama3-8b-8192");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["temperature"], 0.5);
    }

    #[tokio::test]
    async fn test_summarize_against_mock_service() {
        let server = MockServer::start_async().await;
        let completions = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .header("authorization", "Bearer gsk-test")
                    .json_body_partial(json!({ "model": "llama3-8b-8192", "temperature": 0.5 }).to_string())
                    .body_contains("2-3 sentence");
                then.status(200)
                    .json_body(json!({ "choices": [{ "message": { "role": "assistant", "content": "Done." } }] }));
            })
            .await;
        let config = GroqConfig { endpoint: server.base_url(), ..Default::default() };
        let client = GroqClient::new("gsk-test", config).unwrap();

        let summary = client.summarize(&request()).await.unwrap();

        completions.assert_async().await;
        assert_eq!(summary, "Done.");
    }

    #[tokio::test]
    async fn test_summarize_error_is_not_extraction_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(401).json_body(json!({ "error": { "message": "Invalid API Key" } }));
            })
            .await;
        let config = GroqConfig { endpoint: server.base_url(), ..Default::default() };
        let client = GroqClient::new("bad", config).unwrap();

        let err = client.summarize(&request()).await.unwrap_err();

        assert!(err.extraction_kind().is_none());
        assert!(err.to_string().contains("Invalid API Key"));
        assert!(err.to_string().contains("401"));
    }
}
