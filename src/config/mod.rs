//! Configuration module for the WaaV relay
//!
//! Configuration comes from environment variables (with `.env` support loaded in
//! `main.rs`) and an optional YAML file. Priority: YAML > ENV vars > .env values > defaults.
//!
//! Provider API keys are optional. The relay starts without them and the
//! affected upstream calls fail when they are made.
//!
//! # Example
//! ```rust,no_run
//! use waav_relay::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable base
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

mod env;
mod yaml;

pub use yaml::YamlConfig;

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 4000;

/// Deepgram live transcription endpoint
pub const DEFAULT_DEEPGRAM_STT_URL: &str = crate::core::stt::DEEPGRAM_STT_URL;

/// Deepgram speech synthesis endpoint
pub const DEFAULT_DEEPGRAM_TTS_URL: &str = crate::core::tts::DEEPGRAM_TTS_URL;

/// Groq OpenAI-compatible chat completions endpoint
pub const DEFAULT_GROQ_API_URL: &str = crate::core::llm::GROQ_API_URL;

/// Server configuration
///
/// Contains everything needed to run the relay:
/// - Server settings (host, port)
/// - Provider credentials (Deepgram, Groq)
/// - Upstream endpoints (overridable for self-hosted or mocked providers)
/// - CORS settings
/// - Relay session behavior
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // Provider API keys
    /// Deepgram key, used for both the live transcription relay and speech synthesis
    pub deepgram_api_key: Option<String>,
    /// Groq key for transcript completions
    pub groq_api_key: Option<String>,

    // Upstream endpoints
    pub deepgram_stt_url: String,
    pub deepgram_tts_url: String,
    pub groq_api_url: String,

    // Security settings
    /// `*` for any origin, otherwise a comma-separated origin list.
    /// `None` means same-origin only.
    pub cors_allowed_origins: Option<String>,

    // Relay settings
    /// Close the browser connection when its upstream fails or closes.
    /// Off by default, which leaves the client connected after an upstream failure.
    pub close_client_on_upstream_error: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            deepgram_api_key: None,
            groq_api_key: None,
            deepgram_stt_url: DEFAULT_DEEPGRAM_STT_URL.to_string(),
            deepgram_tts_url: DEFAULT_DEEPGRAM_TTS_URL.to_string(),
            groq_api_url: DEFAULT_GROQ_API_URL.to_string(),
            cors_allowed_origins: Some("*".to_string()),
            close_client_on_upstream_error: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but malformed (e.g. a non-numeric `PORT`).
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        env::load_from_env()
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = YamlConfig::from_file(path)?;
        let mut config = env::load_from_env()?;
        config.apply_yaml(yaml_config);
        Ok(config)
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn apply_yaml(&mut self, yaml: YamlConfig) {
        if let Some(server) = yaml.server {
            if let Some(host) = server.host {
                self.host = host;
            }
            if let Some(port) = server.port {
                self.port = port;
            }
        }

        if let Some(providers) = yaml.providers {
            if providers.deepgram_api_key.is_some() {
                self.deepgram_api_key = providers.deepgram_api_key;
            }
            if providers.groq_api_key.is_some() {
                self.groq_api_key = providers.groq_api_key;
            }
            if let Some(url) = providers.deepgram_stt_url {
                self.deepgram_stt_url = url;
            }
            if let Some(url) = providers.deepgram_tts_url {
                self.deepgram_tts_url = url;
            }
            if let Some(url) = providers.groq_api_url {
                self.groq_api_url = url;
            }
        }

        if let Some(security) = yaml.security
            && security.cors_allowed_origins.is_some()
        {
            self.cors_allowed_origins = security.cors_allowed_origins;
        }

        if let Some(relay) = yaml.relay
            && let Some(close) = relay.close_client_on_upstream_error
        {
            self.close_client_on_upstream_error = close;
        }
    }
}
