pub mod deepgram;

// Re-export Deepgram implementation
pub use deepgram::{DEEPGRAM_STT_URL, DeepgramSTT, DeepgramSTTConfig, UpstreamSink, UpstreamStream};

/// Errors raised while talking to a speech recognition provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum STTError {
    /// Credentials missing or rejected by the provider
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The provider handshake could not be completed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Transport failure on an established connection
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Invalid endpoint or request construction
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type for STT operations
pub type STTResult<T> = Result<T, STTError>;
