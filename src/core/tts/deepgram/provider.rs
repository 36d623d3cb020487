//! Deepgram speech synthesis provider.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://api.deepgram.com/v1/speak`
//! - Query: `model`, `encoding`, `container`
//! - Body: `{"text": "..."}`
//! - Output: chunked audio in the requested container

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use tracing::{debug, error, info};

use super::config::DeepgramTTSConfig;
use crate::core::tts::{
    AudioResult, SpeechSynthesizer, TTSError, TTSResult, WAV_CONTENT_TYPE, collect_audio,
};

const USER_AGENT: &str = concat!("waav-relay/", env!("CARGO_PKG_VERSION"));

/// Request body; `text` is left out when absent
#[derive(Debug, Serialize)]
struct SpeakRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

/// Deepgram TTS provider
///
/// Each call issues one request and buffers the whole response before
/// returning it.
#[derive(Debug, Clone)]
pub struct DeepgramTTS {
    config: DeepgramTTSConfig,
    http_client: Client,
}

impl DeepgramTTS {
    pub fn new(config: DeepgramTTSConfig) -> TTSResult<Self> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                TTSError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self::with_client(config, http_client))
    }

    pub fn with_client(config: DeepgramTTSConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &DeepgramTTSConfig {
        &self.config
    }

    fn build_http_request(&self, text: Option<&str>) -> TTSResult<reqwest::RequestBuilder> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            TTSError::AuthenticationFailed("DEEPGRAM_API_KEY is not configured".to_string())
        })?;
        let url = self.config.request_url()?;

        Ok(self
            .http_client
            .post(url)
            .header(AUTHORIZATION, format!("Token {api_key}"))
            .json(&SpeakRequest { text }))
    }
}

#[async_trait]
impl SpeechSynthesizer for DeepgramTTS {
    async fn synthesize(&self, text: Option<&str>) -> TTSResult<AudioResult> {
        let request = self.build_http_request(text)?;

        debug!(
            model = %self.config.model,
            text_len = text.map(str::len),
            "Requesting Deepgram TTS"
        );

        let response = request
            .send()
            .await
            .map_err(|e| TTSError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Deepgram TTS error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => TTSError::AuthenticationFailed(format!(
                    "Deepgram TTS rejected the API key ({status}): {error_text}"
                )),
                _ => TTSError::ProviderError(format!(
                    "Deepgram TTS error ({status}): {error_text}"
                )),
            });
        }

        let data = collect_audio(response.bytes_stream()).await.inspect_err(|e| {
            error!("Deepgram TTS audio stream failed: {}", e);
        })?;

        info!(bytes = data.len(), "Deepgram TTS audio received");

        Ok(AudioResult {
            data,
            content_type: WAV_CONTENT_TYPE,
        })
    }

    fn provider_name(&self) -> &'static str {
        "deepgram"
    }
}
