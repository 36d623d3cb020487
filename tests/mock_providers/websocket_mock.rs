//! WebSocket mock of the Deepgram listen endpoint
//!
//! Records what the relay sends upstream and answers each binary frame with a
//! Deepgram-style `Results` message.

use std::net::SocketAddr;
use std::time::Duration;

use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;

/// How the mock behaves after accepting a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenBehavior {
    /// Answer every binary frame with one result message
    EchoResults,
    /// Complete the handshake, then close immediately
    CloseAfterHandshake,
    /// Refuse the handshake with 401
    RejectHandshake,
}

/// Something the mock observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamEvent {
    Connected { authorization: Option<String> },
    Rejected { authorization: Option<String> },
    Binary(Bytes),
    Text(String),
    Closed,
}

pub struct MockListenServer {
    pub addr: SocketAddr,
    pub events: mpsc::UnboundedReceiver<UpstreamEvent>,
}

impl MockListenServer {
    pub fn url(&self) -> String {
        format!("ws://{}/v1/listen", self.addr)
    }

    /// Next event, failing the test if none arrives in time
    pub async fn next_event(&mut self) -> UpstreamEvent {
        timeout(Duration::from_secs(5), self.events.recv())
            .await
            .expect("timed out waiting for upstream event")
            .expect("mock server stopped")
    }

    /// Whether any event arrives within `wait`
    pub async fn is_quiet_for(&mut self, wait: Duration) -> bool {
        timeout(wait, self.events.recv()).await.is_err()
    }
}

/// Result message sent for the `n`th audio frame of a connection
pub fn result_message(n: u64, bytes: usize) -> String {
    json!({
        "type": "Results",
        "is_final": true,
        "channel": {
            "alternatives": [{
                "transcript": format!("chunk {n}"),
                "confidence": 0.95
            }]
        },
        "bytes": bytes
    })
    .to_string()
}

pub async fn start_listen_server(behavior: ListenBehavior) -> MockListenServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock listen server");
    let addr = listener.local_addr().unwrap();
    let (events_tx, events) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(handle_connection(stream, behavior, events_tx.clone()));
        }
    });

    MockListenServer { addr, events }
}

async fn handle_connection(
    stream: TcpStream,
    behavior: ListenBehavior,
    events: mpsc::UnboundedSender<UpstreamEvent>,
) {
    let handshake_events = events.clone();
    let callback = move |request: &Request, response: Response| {
        let authorization = request
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        if behavior == ListenBehavior::RejectHandshake {
            let _ = handshake_events.send(UpstreamEvent::Rejected { authorization });
            let mut error = ErrorResponse::new(Some("unauthorized".to_string()));
            *error.status_mut() = StatusCode::UNAUTHORIZED;
            return Err(error);
        }

        let _ = handshake_events.send(UpstreamEvent::Connected { authorization });
        Ok(response)
    };

    let Ok(ws_stream) = accept_hdr_async(stream, callback).await else {
        return;
    };
    let (mut write, mut read) = ws_stream.split();

    if behavior == ListenBehavior::CloseAfterHandshake {
        let _ = write.send(Message::Close(None)).await;
        let _ = events.send(UpstreamEvent::Closed);
        return;
    }

    let mut count = 0u64;
    while let Some(message) = read.next().await {
        match message {
            Ok(Message::Binary(data)) => {
                count += 1;
                let reply = result_message(count, data.len());
                let _ = events.send(UpstreamEvent::Binary(data));
                if write.send(Message::Text(reply.into())).await.is_err() {
                    break;
                }
            }
            Ok(Message::Text(text)) => {
                let _ = events.send(UpstreamEvent::Text(text.as_str().to_owned()));
            }
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => {}
        }
    }

    let _ = events.send(UpstreamEvent::Closed);
}
