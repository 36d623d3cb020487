//! Configuration for the Deepgram live transcription upstream.

use crate::config::ServerConfig;

/// Deepgram live transcription WebSocket endpoint
pub const DEEPGRAM_STT_URL: &str = "wss://api.deepgram.com/v1/listen";

/// Settings for opening one upstream recognition connection
///
/// No query parameters are added to the URL. Audio format and model selection
/// are whatever the configured URL carries, so a browser streaming a
/// self-describing container works with the bare endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepgramSTTConfig {
    /// API key sent as `Authorization: Token <key>` during the handshake
    pub api_key: Option<String>,
    /// WebSocket URL of the listen endpoint
    pub url: String,
}

impl Default for DeepgramSTTConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: DEEPGRAM_STT_URL.to_string(),
        }
    }
}

impl DeepgramSTTConfig {
    /// Build from the server configuration
    pub fn from_server_config(config: &ServerConfig) -> Self {
        Self {
            api_key: config.deepgram_api_key.clone(),
            url: config.deepgram_stt_url.clone(),
        }
    }

    /// Value of the handshake `Authorization` header, if a key is configured
    pub fn authorization(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| format!("Token {key}"))
    }
}
