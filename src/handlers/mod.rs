//! HTTP and WebSocket request handlers
//!
//! - `api` - Health check endpoint
//! - `audio` - Text-to-speech forwarding
//! - `generate` - Transcript completion forwarding
//! - `ws` - Browser to Deepgram transcription relay

pub mod api;
pub mod audio;
pub mod generate;
pub mod ws;

use serde::de::DeserializeOwned;
use tracing::debug;

// Re-export commonly used handlers for convenient access
pub use audio::generate_audio;
pub use generate::generate_content;
pub use ws::ws_relay_handler;

/// Parse a JSON request body without rejecting it.
///
/// Request fields are never validated here. A body that is empty, not JSON, or
/// of the wrong shape yields the default value and the upstream decides.
pub(crate) fn lenient_json<T>(body: &[u8]) -> T
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, bytes = body.len(), "Request body not usable, fields treated as absent");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Body {
        text: Option<String>,
    }

    #[test]
    fn test_lenient_json() {
        assert_eq!(
            lenient_json::<Body>(br#"{"text":"hi"}"#).text.as_deref(),
            Some("hi")
        );
        assert_eq!(lenient_json::<Body>(b"{}"), Body::default());
        assert_eq!(lenient_json::<Body>(b""), Body::default());
        assert_eq!(lenient_json::<Body>(b"not json"), Body::default());
        assert_eq!(lenient_json::<Body>(br#"{"text":42}"#), Body::default());
    }
}
