//! Configuration for Groq chat completions.

use crate::config::ServerConfig;

/// Groq OpenAI-compatible chat completions endpoint
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Model used for every completion
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroqLLMConfig {
    /// Sent as `Authorization: Bearer <key>`
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
}

impl Default for GroqLLMConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: GROQ_API_URL.to_string(),
            model: DEFAULT_GROQ_MODEL.to_string(),
        }
    }
}

impl GroqLLMConfig {
    /// Build from the server configuration
    pub fn from_server_config(config: &ServerConfig) -> Self {
        Self {
            api_key: config.groq_api_key.clone(),
            api_url: config.groq_api_url.clone(),
            ..Default::default()
        }
    }
}
