//! Summarization request shaping.
//!
//! Turns extracted article text into a bounded, length-specific prompt for a
//! chat-style text-generation model. Nothing here touches the network.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cleanup::truncate_chars;

/// Content beyond this many characters is cut before prompting.
pub const MAX_CONTENT_CHARS: usize = 15_000;

/// Appended to content that was cut at [`MAX_CONTENT_CHARS`].
pub const TRUNCATION_MARKER: &str = "...";

/// Used in the prompt when the page had no usable title.
pub const TITLE_PLACEHOLDER: &str = "Article";

/// What the model should pay attention to, in order.
pub const FOCUS_DIRECTIVES: &[&str] = &[
    "Main arguments or points",
    "Key insights or findings",
    "Important conclusions or takeaways",
    "Actionable information if present",
];

pub const SYSTEM_PERSONA: &str = "You are an expert content summarizer. Create clear, informative summaries that \
capture the essence of articles while being engaging and easy to understand. Focus on the most valuable \
information for readers.";

/// Desired length of the generated summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    /// Two or three sentences.
    Short,
    /// One or two paragraphs, four to six sentences.
    #[default]
    Medium,
    /// Two or three paragraphs, six to ten sentences.
    Long,
}

impl SummaryLength {
    /// Resolves a mode name case-insensitively.
    ///
    /// Anything unrecognized resolves to [`SummaryLength::Medium`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "short" => Self::Short,
            "long" => Self::Long,
            _ => Self::Medium,
        }
    }

    /// The fixed instruction sentence for this mode.
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Short => "Provide a concise 2-3 sentence summary highlighting only the most important points.",
            Self::Medium => {
                "Provide a comprehensive summary in 1-2 paragraphs (4-6 sentences) covering the main points and key insights."
            }
            Self::Long => {
                "Provide a detailed summary in 2-3 paragraphs (6-10 sentences) covering main points, supporting details, and key takeaways."
            }
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short => write!(f, "Short"),
            Self::Medium => write!(f, "Medium"),
            Self::Long => write!(f, "Long"),
        }
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message of a chat completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Everything needed to ask a model for a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizationRequest {
    pub title: String,
    pub content: String,
    pub instruction: &'static str,
}

impl SummarizationRequest {
    /// Builds a request, truncating content to [`MAX_CONTENT_CHARS`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use brevis_core::{SummarizationRequest, SummaryLength};
    ///
    /// let content = "x".repeat(20_000);
    /// let request = SummarizationRequest::build(None, &content, SummaryLength::Short);
    /// assert_eq!(request.content.len(), 15_003);
    /// assert_eq!(request.title, "Article");
    /// ```
    pub fn build(title: Option<&str>, content: &str, length: SummaryLength) -> Self {
        let title = match title.map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => TITLE_PLACEHOLDER.to_string(),
        };

        let content = match truncate_chars(content, MAX_CONTENT_CHARS) {
            Some(head) => format!("{}{}", head, TRUNCATION_MARKER),
            None => content.to_string(),
        };

        Self { title, content, instruction: length.instruction() }
    }

    /// Whether the content was cut to fit the budget.
    pub fn is_truncated(&self) -> bool {
        self.content.chars().count() > MAX_CONTENT_CHARS
    }

    /// The user-facing prompt text.
    pub fn prompt(&self) -> String {
        let focus = FOCUS_DIRECTIVES
            .iter()
            .map(|d| format!("- {}", d))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Please summarize the following blog post/article. {}\n\nTitle: {}\n\nContent: {}\n\nFocus on:\n{}\n\nSummary:",
            self.instruction, self.title, self.content, focus
        )
    }

    /// The system persona followed by the user prompt.
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![ChatMessage::system(SYSTEM_PERSONA), ChatMessage::user(self.prompt())]
    }
}
