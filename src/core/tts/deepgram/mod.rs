//! Deepgram Speak (Aura) speech synthesis.

mod config;
mod provider;

pub use config::{
    DEEPGRAM_TTS_URL, DEFAULT_CONTAINER, DEFAULT_ENCODING, DEFAULT_VOICE_MODEL, DeepgramTTSConfig,
};
pub use provider::DeepgramTTS;
