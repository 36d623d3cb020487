//! Groq chat completions.
//!
//! Groq exposes an OpenAI-compatible `chat/completions` endpoint authenticated
//! with a bearer token. One request is sent per transcript with no retries and
//! no timeout beyond the transport's own.

mod client;
mod config;
mod messages;

pub use client::GroqLLM;
pub use config::{DEFAULT_GROQ_MODEL, GROQ_API_URL, GroqLLMConfig};
pub use messages::{ChatCompletionRequest, ChatMessage, GroqError, GroqErrorResponse};
