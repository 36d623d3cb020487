//! Mock provider servers
//!
//! - WebSocket: Deepgram live transcription (`websocket_mock`)
//! - HTTP: raw chunked responses for streamed synthesis (`http_mock`)
//!
//! Groq and well-formed Deepgram TTS responses are mocked with wiremock
//! directly in the tests.

// Each test binary uses a different subset of the helpers
#![allow(dead_code)]

pub mod http_mock;
pub mod websocket_mock;
