use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt, future};
use tracing::debug;

use crate::core::relay::{RelayError, RelayMessage, RelaySession};
use crate::state::AppState;

/// WebSocket upgrade handler for the transcription relay
pub async fn ws_relay_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    debug!("Relay WebSocket upgrade requested");
    ws.on_upgrade(move |socket| handle_relay_socket(socket, state))
}

/// Pair the browser socket with a new upstream connection and relay until
/// the browser goes away
async fn handle_relay_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();

    let client_tx = sender.with(|message: RelayMessage| {
        future::ready(Ok::<Message, axum::Error>(Message::from(message)))
    });
    let client_rx = receiver.filter_map(|message| {
        future::ready(match message {
            Ok(message) => RelayMessage::from_client(message).map(Ok),
            Err(e) => Some(Err(RelayError::Client(e.to_string()))),
        })
    });

    let stt = state.speech_recognizer();
    let connect = async move { stt.connect().await };

    RelaySession::new(state.relay_options())
        .run(client_tx, client_rx, connect)
        .await;
}
