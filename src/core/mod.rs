pub mod llm;
pub mod relay;
pub mod stt;
pub mod tts;

// Re-export commonly used types for convenience
pub use llm::{CompletionResult, GroqLLM, GroqLLMConfig, LLMError, LLMResult, TextGenerator};
pub use relay::{RelayError, RelayMessage, RelayOptions, RelaySession, RelayStats};
pub use stt::{DeepgramSTT, DeepgramSTTConfig, STTError, STTResult};
pub use tts::{
    AudioResult, DeepgramTTS, DeepgramTTSConfig, SpeechSynthesizer, TTSError, TTSResult,
    collect_audio,
};
