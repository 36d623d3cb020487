//! Bidirectional relay between a browser WebSocket and a provider WebSocket.
//!
//! - [`message`]: the frame type shared by both sides
//! - [`session`]: the session loop, its options and counters

pub mod message;
pub mod session;

pub use message::RelayMessage;
pub use session::{
    CLIENT_DRAIN_TIMEOUT, RelayOptions, RelaySession, RelayStats, UPSTREAM_CLOSE_TIMEOUT,
    UpstreamState, WRITER_QUEUE_CAPACITY,
};

use crate::core::stt::STTError;

/// Errors surfaced by either side of a relay session
#[derive(Debug, Clone, thiserror::Error)]
pub enum RelayError {
    /// The browser connection failed
    #[error("Client connection error: {0}")]
    Client(String),

    /// The provider connection failed
    #[error("Upstream connection error: {0}")]
    Upstream(#[from] STTError),
}
