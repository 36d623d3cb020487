//! Wire types for the Groq chat completions API.

use serde::{Deserialize, Serialize};

// =============================================================================
// Request
// =============================================================================

/// Body of a chat completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
}

/// One message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,

    /// Omitted from the wire when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn user(content: Option<&str>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.map(str::to_string),
        }
    }
}

impl ChatCompletionRequest {
    /// Single-turn request carrying the transcript as the only user message
    pub fn from_transcript(transcript: Option<&str>, model: &str) -> Self {
        Self {
            messages: vec![ChatMessage::user(transcript)],
            model: model.to_string(),
        }
    }
}

// =============================================================================
// Error Response
// =============================================================================

/// Error response from Groq API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqErrorResponse {
    pub error: GroqError,
}

/// Error details from Groq API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqError {
    /// Human-readable error message.
    pub message: String,

    /// Error type classification.
    #[serde(rename = "type", default)]
    pub error_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
