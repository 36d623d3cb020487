//! Transcription relay route configuration

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::ws::ws_relay_handler;
use crate::state::AppState;
use std::sync::Arc;

/// Create the relay WebSocket router
///
/// # Endpoint
///
/// `GET /` - WebSocket upgrade, served at the bare listener address
///
/// # Protocol
///
/// Clients send binary audio frames. Every frame the recognition provider
/// sends back (typically JSON text results) is forwarded unchanged. Closing the
/// client socket closes the provider connection.
pub fn create_ws_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(ws_relay_handler))
        .layer(TraceLayer::new_for_http())
}
