//! Frames exchanged over a relay session.
//!
//! Both sides of a session speak WebSocket, but through different crates: the
//! browser side is an axum socket and the provider side is a tokio-tungstenite
//! client. [`RelayMessage`] is the common denominator the session loop works with.
//! Ping and pong frames are answered by each transport and never cross the relay.

use axum::extract::ws::Message as ClientMessage;
use bytes::Bytes;
use tokio_tungstenite::tungstenite::Message as UpstreamMessage;

/// One frame travelling through a relay session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayMessage {
    /// Binary payload, typically raw audio from the browser
    Binary(Bytes),
    /// Text payload, typically a transcription result from the provider
    Text(String),
    /// The sending side is closing the connection
    Close,
}

impl RelayMessage {
    /// Convert a frame received from the browser socket.
    ///
    /// Returns `None` for control frames that are not relayed.
    pub fn from_client(message: ClientMessage) -> Option<Self> {
        match message {
            ClientMessage::Binary(data) => Some(Self::Binary(data)),
            ClientMessage::Text(text) => Some(Self::Text(text.as_str().to_owned())),
            ClientMessage::Close(_) => Some(Self::Close),
            ClientMessage::Ping(_) | ClientMessage::Pong(_) => None,
        }
    }

    /// Convert a frame received from the provider socket.
    ///
    /// Returns `None` for control and raw frames that are not relayed.
    pub fn from_upstream(message: UpstreamMessage) -> Option<Self> {
        match message {
            UpstreamMessage::Binary(data) => Some(Self::Binary(data)),
            UpstreamMessage::Text(text) => Some(Self::Text(text.as_str().to_owned())),
            UpstreamMessage::Close(_) => Some(Self::Close),
            UpstreamMessage::Ping(_) | UpstreamMessage::Pong(_) | UpstreamMessage::Frame(_) => {
                None
            }
        }
    }

    /// Payload size in bytes (zero for close frames)
    pub fn len(&self) -> usize {
        match self {
            Self::Binary(data) => data.len(),
            Self::Text(text) => text.len(),
            Self::Close => 0,
        }
    }

    /// Whether the frame carries no payload; pairs with [`RelayMessage::len`]
    /// for `clippy::len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<RelayMessage> for ClientMessage {
    fn from(message: RelayMessage) -> Self {
        match message {
            RelayMessage::Binary(data) => ClientMessage::Binary(data),
            RelayMessage::Text(text) => ClientMessage::Text(text.into()),
            RelayMessage::Close => ClientMessage::Close(None),
        }
    }
}

impl From<RelayMessage> for UpstreamMessage {
    fn from(message: RelayMessage) -> Self {
        match message {
            RelayMessage::Binary(data) => UpstreamMessage::Binary(data),
            RelayMessage::Text(text) => UpstreamMessage::Text(text.into()),
            RelayMessage::Close => UpstreamMessage::Close(None),
        }
    }
}
