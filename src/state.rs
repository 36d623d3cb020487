use std::sync::Arc;

use anyhow::Context;

use crate::config::ServerConfig;
use crate::core::llm::{GroqLLM, GroqLLMConfig, TextGenerator};
use crate::core::relay::RelayOptions;
use crate::core::stt::{DeepgramSTT, DeepgramSTTConfig};
use crate::core::tts::{DeepgramTTS, DeepgramTTSConfig, SpeechSynthesizer};

/// Shared application state
///
/// Provider clients are built once at startup and shared by every request.
/// Relay sessions open their own upstream connection per client.
pub struct AppState {
    pub config: ServerConfig,
    pub text_generator: Arc<dyn TextGenerator>,
    pub speech_synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> anyhow::Result<Arc<Self>> {
        let text_generator = GroqLLM::new(GroqLLMConfig::from_server_config(&config))
            .context("Failed to create Groq client")?;
        let speech_synthesizer = DeepgramTTS::new(DeepgramTTSConfig::from_server_config(&config))
            .context("Failed to create Deepgram TTS client")?;

        if config.deepgram_api_key.is_none() {
            tracing::warn!("DEEPGRAM_API_KEY not set, transcription and audio requests will fail");
        }
        if config.groq_api_key.is_none() {
            tracing::warn!("GROQ_API_KEY not set, content generation requests will fail");
        }

        Ok(Self::with_providers(
            config,
            Arc::new(text_generator),
            Arc::new(speech_synthesizer),
        ))
    }

    /// Build state around explicit providers
    pub fn with_providers(
        config: ServerConfig,
        text_generator: Arc<dyn TextGenerator>,
        speech_synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            text_generator,
            speech_synthesizer,
        })
    }

    pub fn relay_options(&self) -> RelayOptions {
        RelayOptions {
            close_client_on_upstream_error: self.config.close_client_on_upstream_error,
        }
    }

    /// Client for a new upstream transcription connection
    pub fn speech_recognizer(&self) -> DeepgramSTT {
        DeepgramSTT::new(DeepgramSTTConfig::from_server_config(&self.config))
    }
}
