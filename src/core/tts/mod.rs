//! Speech synthesis.
//!
//! A [`SpeechSynthesizer`] turns text into one complete audio file. Providers
//! stream audio back in chunks; [`collect_audio`] joins them in arrival order
//! and only yields a result once the stream has ended cleanly, so a partial
//! file is never returned.

pub mod deepgram;

use std::pin::pin;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};

pub use deepgram::{DEEPGRAM_TTS_URL, DeepgramTTS, DeepgramTTSConfig};

/// Content type of synthesized audio
pub const WAV_CONTENT_TYPE: &str = "audio/wav";

/// Errors raised while synthesizing speech
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TTSError {
    /// Credentials missing or rejected by the provider
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The request never produced a response
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The provider answered with a non-success status
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// The audio stream failed before it was complete
    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for TTS operations
pub type TTSResult<T> = Result<T, TTSError>;

/// A fully buffered audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioResult {
    /// Audio bytes in provider order
    pub data: Bytes,
    /// MIME type of `data`
    pub content_type: &'static str,
}

/// Provider of complete audio files for text
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` into a single WAV file.
    ///
    /// A `None` text is sent to the provider as a body without the field.
    async fn synthesize(&self, text: Option<&str>) -> TTSResult<AudioResult>;

    /// Provider name for logging
    fn provider_name(&self) -> &'static str;
}

/// Concatenate an audio chunk stream into one buffer.
///
/// Chunks are appended in the order they arrive. The first stream error
/// discards everything received so far.
pub async fn collect_audio<S, E>(stream: S) -> TTSResult<Bytes>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: std::fmt::Display,
{
    let mut stream = pin!(stream);
    let mut buffer = BytesMut::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| TTSError::StreamError(e.to_string()))?;
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn test_collect_audio_preserves_order() {
        let chunks = vec![
            Ok::<_, TTSError>(Bytes::from_static(b"RIFF")),
            Ok(Bytes::from_static(b"\x24\x00\x00\x00")),
            Ok(Bytes::from_static(b"WAVE")),
        ];

        let audio = collect_audio(stream::iter(chunks)).await.unwrap();
        assert_eq!(audio.as_ref(), b"RIFF\x24\x00\x00\x00WAVE");
    }

    #[tokio::test]
    async fn test_collect_audio_empty_stream() {
        let audio = collect_audio(stream::iter(Vec::<Result<Bytes, TTSError>>::new()))
            .await
            .unwrap();
        assert!(audio.is_empty());
    }

    #[tokio::test]
    async fn test_collect_audio_fails_on_mid_stream_error() {
        let chunks = vec![
            Ok(Bytes::from_static(b"RIFF")),
            Err("connection reset by peer"),
            Ok(Bytes::from_static(b"WAVE")),
        ];

        let err = collect_audio(stream::iter(chunks)).await.unwrap_err();
        match err {
            TTSError::StreamError(msg) => assert!(msg.contains("connection reset")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
