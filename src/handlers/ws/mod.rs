//! Transcription relay WebSocket handler
//!
//! The browser streams audio as binary frames and receives whatever the
//! recognition provider sends back. Each browser connection gets its own
//! provider connection, opened as soon as the upgrade completes.

mod handler;

pub use handler::ws_relay_handler;
