//! Deepgram live transcription WebSocket client.
//!
//! Unlike the provider clients that parse results into typed callbacks, this
//! client hands back the raw socket halves adapted to [`RelayMessage`], so the
//! relay can pass Deepgram's result frames to the browser untouched.

use std::pin::Pin;

use futures::{Sink, SinkExt, Stream, StreamExt, future};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{
    self, client::IntoClientRequest, http::HeaderValue, http::header::AUTHORIZATION,
    http::Request, protocol::Message,
};
use tracing::{debug, info};

use super::config::DeepgramSTTConfig;
use crate::core::relay::{RelayError, RelayMessage};
use crate::core::stt::{STTError, STTResult};

/// Write half of an upstream connection
pub type UpstreamSink = Pin<Box<dyn Sink<RelayMessage, Error = tungstenite::Error> + Send>>;

/// Read half of an upstream connection
pub type UpstreamStream = Pin<Box<dyn Stream<Item = Result<RelayMessage, RelayError>> + Send>>;

/// Handle for opening upstream recognition connections
///
/// Constructed per relay session from the server configuration; it owns no
/// socket until [`DeepgramSTT::connect`] is called.
#[derive(Debug, Clone)]
pub struct DeepgramSTT {
    config: DeepgramSTTConfig,
}

impl DeepgramSTT {
    pub fn new(config: DeepgramSTTConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeepgramSTTConfig {
        &self.config
    }

    /// Build the WebSocket handshake request with the authorization header
    pub fn build_request(&self) -> STTResult<Request<()>> {
        let authorization = self.config.authorization().ok_or_else(|| {
            STTError::AuthenticationFailed("DEEPGRAM_API_KEY is not configured".to_string())
        })?;

        let mut request = self
            .config
            .url
            .as_str()
            .into_client_request()
            .map_err(|e| {
                STTError::ConfigurationError(format!(
                    "Invalid Deepgram URL '{}': {e}",
                    self.config.url
                ))
            })?;

        let value = HeaderValue::from_str(&authorization).map_err(|e| {
            STTError::ConfigurationError(format!("Invalid Deepgram API key: {e}"))
        })?;
        request.headers_mut().insert(AUTHORIZATION, value);

        Ok(request)
    }

    /// Open one upstream connection and adapt it for relaying.
    ///
    /// Resolves once the WebSocket handshake completes. Each call opens a new
    /// connection; nothing is pooled.
    pub async fn connect(&self) -> STTResult<(UpstreamSink, UpstreamStream)> {
        let request = self.build_request()?;
        debug!(url = %self.config.url, "Connecting to Deepgram STT");

        let (ws_stream, _response) = connect_async(request).await.map_err(map_connect_error)?;
        info!("Connected to Deepgram STT WebSocket");

        let (ws_sink, ws_stream) = ws_stream.split();

        let sink = ws_sink.with(|message: RelayMessage| {
            future::ready(Ok::<Message, tungstenite::Error>(Message::from(message)))
        });

        let stream = ws_stream.filter_map(|message| {
            future::ready(match message {
                Ok(message) => RelayMessage::from_upstream(message).map(Ok),
                Err(e) => Some(Err(RelayError::Upstream(STTError::NetworkError(
                    e.to_string(),
                )))),
            })
        });

        Ok((Box::pin(sink), Box::pin(stream)))
    }
}

/// Classify a handshake failure
fn map_connect_error(error: tungstenite::Error) -> STTError {
    match error {
        tungstenite::Error::Http(response) => {
            let status = response.status();
            match status.as_u16() {
                401 | 403 => STTError::AuthenticationFailed(format!(
                    "Deepgram rejected the API key ({status})"
                )),
                _ => STTError::ConnectionFailed(format!(
                    "Deepgram handshake rejected with status {status}"
                )),
            }
        }
        other => STTError::ConnectionFailed(format!("Failed to connect to Deepgram: {other}")),
    }
}
