//! Text generation from transcripts.
//!
//! A [`TextGenerator`] turns one transcript into one chat completion. The
//! completion body is returned as the provider sent it, so callers can hand it
//! to the browser without re-encoding.

pub mod groq;

use async_trait::async_trait;
use bytes::Bytes;

pub use groq::{DEFAULT_GROQ_MODEL, GROQ_API_URL, GroqLLM, GroqLLMConfig};

/// Errors raised while requesting a completion
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LLMError {
    /// Credentials missing or rejected by the provider
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The request never produced a response
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The provider throttled the request
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The provider answered with a non-success status
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// The provider answered 2xx with a body that is not JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid endpoint or client construction
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type for LLM operations
pub type LLMResult<T> = Result<T, LLMError>;

/// A completed chat completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    /// Response body exactly as received, known to be valid JSON
    pub body: Bytes,
}

/// Provider of chat completions for a transcript
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Request one completion whose only message is the transcript.
    ///
    /// A `None` transcript is forwarded as a user message without content.
    async fn generate(&self, transcript: Option<&str>) -> LLMResult<CompletionResult>;

    /// Provider name for logging
    fn provider_name(&self) -> &'static str;
}
