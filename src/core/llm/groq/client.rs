//! Groq chat completions client.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::de::IgnoredAny;
use tracing::{debug, error, info};

use super::config::GroqLLMConfig;
use super::messages::{ChatCompletionRequest, GroqErrorResponse};
use crate::core::llm::{CompletionResult, LLMError, LLMResult, TextGenerator};

/// User-Agent header value for API requests.
const USER_AGENT: &str = concat!("waav-relay/", env!("CARGO_PKG_VERSION"));

/// Groq chat completions client
///
/// Holds one pooled HTTP client for the lifetime of the server.
#[derive(Debug, Clone)]
pub struct GroqLLM {
    config: GroqLLMConfig,
    http_client: Client,
}

impl GroqLLM {
    pub fn new(config: GroqLLMConfig) -> LLMResult<Self> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LLMError::ConfigurationError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(config, http_client))
    }

    /// Use an existing HTTP client
    pub fn with_client(config: GroqLLMConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &GroqLLMConfig {
        &self.config
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> LLMResult<CompletionResult> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            LLMError::AuthenticationFailed("GROQ_API_KEY is not configured".to_string())
        })?;

        let response = self
            .http_client
            .post(&self.config.api_url)
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .json(body)
            .send()
            .await
            .map_err(|e| LLMError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        if let Some(ref request_id) = request_id {
            debug!("Groq request ID: {}", request_id);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LLMError::NetworkError(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(classify_error(status.as_u16(), &body, request_id.as_deref()));
        }

        serde_json::from_slice::<IgnoredAny>(&body).map_err(|e| {
            LLMError::InvalidResponse(format!("Completion body is not valid JSON: {e}"))
        })?;

        Ok(CompletionResult { body })
    }
}

#[async_trait]
impl TextGenerator for GroqLLM {
    async fn generate(&self, transcript: Option<&str>) -> LLMResult<CompletionResult> {
        let request = ChatCompletionRequest::from_transcript(transcript, &self.config.model);

        debug!(
            model = %self.config.model,
            transcript_len = transcript.map(str::len),
            "Requesting Groq completion"
        );

        match self.send_request(&request).await {
            Ok(result) => {
                info!(bytes = result.body.len(), "Groq completion received");
                Ok(result)
            }
            Err(e) => {
                error!("Groq completion failed: {}", e);
                Err(e)
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "groq"
    }
}

/// Map a non-success response to an error
fn classify_error(status: u16, body: &[u8], request_id: Option<&str>) -> LLMError {
    let error_msg = match serde_json::from_slice::<GroqErrorResponse>(body) {
        Ok(error_response) => format!(
            "Groq API error: {} ({})",
            error_response.error.message, error_response.error.error_type
        ),
        Err(_) => format!(
            "Groq API error ({}): {}",
            status,
            String::from_utf8_lossy(body)
        ),
    };

    let request_id_suffix = request_id
        .map(|id| format!(" [request_id: {id}]"))
        .unwrap_or_default();

    match status {
        401 | 403 => LLMError::AuthenticationFailed(format!("{error_msg}{request_id_suffix}")),
        429 => LLMError::RateLimited(format!("{error_msg}{request_id_suffix}")),
        500..=599 => LLMError::ProviderError(format!("Server error: {error_msg}{request_id_suffix}")),
        _ => LLMError::ProviderError(format!("{error_msg}{request_id_suffix}")),
    }
}
