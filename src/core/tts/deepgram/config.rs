//! Configuration for Deepgram speech synthesis.

use url::Url;

use crate::config::ServerConfig;
use crate::core::tts::{TTSError, TTSResult};

/// Deepgram Speak REST endpoint
pub const DEEPGRAM_TTS_URL: &str = "https://api.deepgram.com/v1/speak";

/// Aura voice used for every request
pub const DEFAULT_VOICE_MODEL: &str = "aura-asteria-en";

/// 16-bit linear PCM samples
pub const DEFAULT_ENCODING: &str = "linear16";

/// Wrap the samples in a WAV container
pub const DEFAULT_CONTAINER: &str = "wav";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepgramTTSConfig {
    /// Sent as `Authorization: Token <key>`
    pub api_key: Option<String>,
    pub url: String,
    pub model: String,
    pub encoding: String,
    pub container: String,
}

impl Default for DeepgramTTSConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: DEEPGRAM_TTS_URL.to_string(),
            model: DEFAULT_VOICE_MODEL.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
            container: DEFAULT_CONTAINER.to_string(),
        }
    }
}

impl DeepgramTTSConfig {
    /// Build from the server configuration
    pub fn from_server_config(config: &ServerConfig) -> Self {
        Self {
            api_key: config.deepgram_api_key.clone(),
            url: config.deepgram_tts_url.clone(),
            ..Default::default()
        }
    }

    /// Endpoint with the model, encoding and container query parameters
    pub fn request_url(&self) -> TTSResult<Url> {
        let mut url = Url::parse(&self.url).map_err(|e| {
            TTSError::InvalidConfiguration(format!("Invalid Deepgram TTS URL '{}': {e}", self.url))
        })?;

        url.query_pairs_mut()
            .append_pair("model", &self.model)
            .append_pair("encoding", &self.encoding)
            .append_pair("container", &self.container);

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url() {
        let url = DeepgramTTSConfig::default().request_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.deepgram.com/v1/speak?model=aura-asteria-en&encoding=linear16&container=wav"
        );
    }

    #[test]
    fn test_request_url_invalid() {
        let config = DeepgramTTSConfig {
            url: "::not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.request_url(),
            Err(TTSError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_from_server_config() {
        let server = ServerConfig {
            deepgram_api_key: Some("dg-key".to_string()),
            deepgram_tts_url: "http://127.0.0.1:8082/v1/speak".to_string(),
            ..Default::default()
        };

        let config = DeepgramTTSConfig::from_server_config(&server);
        assert_eq!(config.api_key.as_deref(), Some("dg-key"));
        assert_eq!(config.model, DEFAULT_VOICE_MODEL);
        assert_eq!(
            config.request_url().unwrap().as_str(),
            "http://127.0.0.1:8082/v1/speak?model=aura-asteria-en&encoding=linear16&container=wav"
        );
    }
}
