//! Deepgram live transcription upstream.
//!
//! The relay never interprets recognition results. This module only knows how
//! to authenticate and open the provider socket; everything after the
//! handshake is frames.

mod client;
mod config;

pub use client::{DeepgramSTT, UpstreamSink, UpstreamStream};
pub use config::{DEEPGRAM_STT_URL, DeepgramSTTConfig};
