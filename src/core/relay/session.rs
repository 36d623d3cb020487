//! Relay session lifecycle.
//!
//! A [`RelaySession`] pairs one browser connection with one provider connection.
//! The session task reads both sides; each side is written by its own spawned
//! writer fed through a bounded queue, so a peer that stops reading never holds
//! up the opposite direction:
//!
//! ```text
//! ┌──────────┐  binary audio   ┌──────────────┐  queue + writer ┌──────────┐
//! │  client  │────────────────▶│ RelaySession │────────────────▶│ upstream │
//! │ (axum ws)│◀────────────────│  select loop │◀────────────────│(tungsten)│
//! └──────────┘ writer + queue  └──────────────┘  result frames  └──────────┘
//! ```
//!
//! The upstream handshake runs inside the same loop as client reads, so client
//! frames that arrive before the handshake completes are dropped, as are frames
//! that arrive after the upstream has gone away. A frame that finds its writer
//! queue full is dropped too.
//!
//! Frames keep their arrival order within each direction. No ordering holds
//! between the two directions.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{RelayError, RelayMessage};
use crate::core::stt::STTError;

/// Upper bound on closing the upstream after the client has gone
pub const UPSTREAM_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on flushing queued frames to the client once the session ends
pub const CLIENT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Frames queued per direction before further frames are dropped
pub const WRITER_QUEUE_CAPACITY: usize = 1024;

/// Behavior switches for a relay session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayOptions {
    /// Close the client connection when the upstream fails or closes.
    /// When false the client stays connected and its frames are dropped.
    pub close_client_on_upstream_error: bool,
}

/// Per-session frame counters, logged on disconnect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    /// Client frames delivered to the upstream
    pub frames_to_upstream: u64,
    /// Upstream frames delivered to the client
    pub frames_to_client: u64,
    /// Client frames discarded because the upstream was not open or its
    /// writer queue was full
    pub frames_dropped: u64,
    /// Upstream frames discarded because the client writer queue was full
    pub results_dropped: u64,
}

/// Where the upstream connection is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamState {
    /// Handshake in progress
    Connecting,
    /// Ready to accept frames
    Open,
    /// Failed, closed by the provider, or never established
    Closed,
}

/// What the loop should do after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    End,
}

/// Queue into a spawned task that owns one side's sink
#[derive(Debug)]
struct Writer {
    queue: mpsc::Sender<RelayMessage>,
    task: JoinHandle<()>,
}

/// One browser connection paired with one upstream connection
#[derive(Debug)]
pub struct RelaySession {
    id: Uuid,
    options: RelayOptions,
    state: UpstreamState,
    stats: RelayStats,
}

impl RelaySession {
    pub fn new(options: RelayOptions) -> Self {
        Self {
            id: Uuid::new_v4(),
            options,
            state: UpstreamState::Connecting,
            stats: RelayStats::default(),
        }
    }

    /// Session identifier, used only for log correlation
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Drive the session until the client disconnects.
    ///
    /// `connect` resolves to the upstream sink and stream once the provider
    /// handshake completes. It is polled alongside the client stream.
    ///
    /// When this returns the upstream has been closed (or abandoned after
    /// [`UPSTREAM_CLOSE_TIMEOUT`]), queued client frames have been flushed (or
    /// abandoned after [`CLIENT_DRAIN_TIMEOUT`]) and both connections are released.
    pub async fn run<CTx, CRx, UTx, URx, Conn>(
        mut self,
        client_tx: CTx,
        mut client_rx: CRx,
        connect: Conn,
    ) -> RelayStats
    where
        CTx: Sink<RelayMessage> + Send + Unpin + 'static,
        CTx::Error: Display + Send,
        CRx: Stream<Item = Result<RelayMessage, RelayError>> + Unpin,
        UTx: Sink<RelayMessage> + Send + Unpin + 'static,
        UTx::Error: Display + Send,
        URx: Stream<Item = Result<RelayMessage, RelayError>> + Unpin,
        Conn: Future<Output = Result<(UTx, URx), STTError>>,
    {
        let session_id = self.id;
        info!(%session_id, "Client connected");

        let to_client = Arc::new(AtomicU64::new(0));
        let to_upstream = Arc::new(AtomicU64::new(0));

        let client = spawn_client_writer(session_id, client_tx, to_client.clone());
        let mut upstream: Option<Writer> = None;
        let mut upstream_rx: Option<URx> = None;
        let mut close_client = false;

        tokio::pin!(connect);

        loop {
            let flow = tokio::select! {
                connected = &mut connect, if self.state == UpstreamState::Connecting => {
                    match connected {
                        Ok((tx, rx)) => {
                            info!(%session_id, "Upstream connection open");
                            upstream = Some(spawn_upstream_writer(session_id, tx, to_upstream.clone()));
                            upstream_rx = Some(rx);
                            self.state = UpstreamState::Open;
                            Flow::Continue
                        }
                        Err(e) => {
                            error!(%session_id, error = %e, "Upstream WebSocket error");
                            self.upstream_lost(&mut close_client)
                        }
                    }
                }

                incoming = client_rx.next() => match incoming {
                    Some(Ok(RelayMessage::Close)) | None => {
                        info!(%session_id, "Client closed connection");
                        Flow::End
                    }
                    Some(Ok(frame)) => match self.forward_to_upstream(frame, upstream.as_ref()) {
                        Ok(()) => Flow::Continue,
                        Err(e) => {
                            error!(%session_id, error = %e, "Upstream WebSocket error");
                            upstream = None;
                            upstream_rx = None;
                            self.upstream_lost(&mut close_client)
                        }
                    },
                    Some(Err(e)) => {
                        warn!(%session_id, error = %e, "Client connection error");
                        Flow::End
                    }
                },

                incoming = next_frame(&mut upstream_rx), if upstream_rx.is_some() => match incoming {
                    Some(Ok(RelayMessage::Close)) | None => {
                        info!(%session_id, "Upstream closed connection");
                        upstream = None;
                        upstream_rx = None;
                        self.upstream_lost(&mut close_client)
                    }
                    Some(Ok(frame)) => {
                        self.forward_to_client(frame, &client);
                        Flow::Continue
                    }
                    Some(Err(e)) => {
                        error!(%session_id, error = %e, "Upstream WebSocket error");
                        upstream = None;
                        upstream_rx = None;
                        self.upstream_lost(&mut close_client)
                    }
                },
            };

            if flow == Flow::End {
                break;
            }
        }

        drop(upstream_rx);
        tokio::join!(
            async {
                if let Some(writer) = upstream.take() {
                    close_upstream(session_id, writer).await;
                }
            },
            drain_client(session_id, client, close_client),
        );
        self.state = UpstreamState::Closed;

        self.stats.frames_to_upstream = to_upstream.load(Ordering::Relaxed);
        self.stats.frames_to_client = to_client.load(Ordering::Relaxed);

        info!(
            %session_id,
            frames_to_upstream = self.stats.frames_to_upstream,
            frames_to_client = self.stats.frames_to_client,
            frames_dropped = self.stats.frames_dropped,
            results_dropped = self.stats.results_dropped,
            "Client disconnected"
        );

        self.stats
    }

    fn forward_to_upstream(
        &mut self,
        frame: RelayMessage,
        upstream: Option<&Writer>,
    ) -> Result<(), RelayError> {
        let writer = match upstream {
            Some(writer) if self.state == UpstreamState::Open => writer,
            _ => {
                self.stats.frames_dropped += 1;
                debug!(
                    session_id = %self.id,
                    state = ?self.state,
                    bytes = frame.len(),
                    "Upstream not open, dropping client frame"
                );
                return Ok(());
            }
        };

        match writer.queue.try_send(frame) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(frame)) => {
                self.stats.frames_dropped += 1;
                debug!(
                    session_id = %self.id,
                    bytes = frame.len(),
                    "Upstream writer backed up, dropping client frame"
                );
                Ok(())
            }
            Err(TrySendError::Closed(_)) => Err(RelayError::Upstream(STTError::NetworkError(
                "upstream writer stopped".to_string(),
            ))),
        }
    }

    fn forward_to_client(&mut self, frame: RelayMessage, client: &Writer) {
        match client.queue.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(frame)) => {
                self.stats.results_dropped += 1;
                debug!(
                    session_id = %self.id,
                    bytes = frame.len(),
                    "Client writer backed up, dropping upstream frame"
                );
            }
            Err(TrySendError::Closed(frame)) => {
                debug!(
                    session_id = %self.id,
                    bytes = frame.len(),
                    "Client writer stopped, dropping upstream frame"
                );
            }
        }
    }

    fn upstream_lost(&mut self, close_client: &mut bool) -> Flow {
        self.state = UpstreamState::Closed;

        if !self.options.close_client_on_upstream_error {
            debug!(session_id = %self.id, "Upstream gone, client connection left open");
            return Flow::Continue;
        }

        info!(session_id = %self.id, "Upstream gone, closing client connection");
        *close_client = true;
        Flow::End
    }
}

/// Spawn the task that owns the client sink.
///
/// Send failures are logged and the queue keeps draining.
fn spawn_client_writer<CTx>(
    session_id: Uuid,
    mut client_tx: CTx,
    delivered: Arc<AtomicU64>,
) -> Writer
where
    CTx: Sink<RelayMessage> + Send + Unpin + 'static,
    CTx::Error: Display + Send,
{
    let (queue, mut frames) = mpsc::channel::<RelayMessage>(WRITER_QUEUE_CAPACITY);

    let task = tokio::spawn(async move {
        while let Some(frame) = frames.recv().await {
            let closing = matches!(frame, RelayMessage::Close);
            let bytes = frame.len();

            match client_tx.send(frame).await {
                Ok(()) if closing => {}
                Ok(()) => {
                    delivered.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    debug!(%session_id, bytes, error = %e, "Failed to send frame to client")
                }
            }

            if closing {
                break;
            }
        }
    });

    Writer { queue, task }
}

/// Spawn the task that owns the upstream sink.
///
/// A close frame is sent and the sink shut; any send failure stops the task,
/// which the session sees as a closed queue.
fn spawn_upstream_writer<UTx>(
    session_id: Uuid,
    mut upstream_tx: UTx,
    delivered: Arc<AtomicU64>,
) -> Writer
where
    UTx: Sink<RelayMessage> + Send + Unpin + 'static,
    UTx::Error: Display + Send,
{
    let (queue, mut frames) = mpsc::channel::<RelayMessage>(WRITER_QUEUE_CAPACITY);

    let task = tokio::spawn(async move {
        while let Some(frame) = frames.recv().await {
            if matches!(frame, RelayMessage::Close) {
                let closed = async {
                    upstream_tx.send(RelayMessage::Close).await?;
                    upstream_tx.close().await
                };
                match closed.await {
                    Ok(()) => debug!(%session_id, "Upstream connection closed"),
                    Err(e) => debug!(%session_id, error = %e, "Upstream already closed"),
                }
                return;
            }

            if let Err(e) = upstream_tx.send(frame).await {
                error!(%session_id, error = %e, "Upstream WebSocket error");
                return;
            }
            delivered.fetch_add(1, Ordering::Relaxed);
        }
    });

    Writer { queue, task }
}

async fn next_frame<S>(stream: &mut Option<S>) -> Option<S::Item>
where
    S: Stream + Unpin,
{
    match stream {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}

/// Queue a close for the upstream and wait for its writer to finish
async fn close_upstream(session_id: Uuid, writer: Writer) {
    let Writer { queue, mut task } = writer;

    let closing = async {
        // Err means the writer already stopped
        let _ = queue.send(RelayMessage::Close).await;
        drop(queue);
        let _ = (&mut task).await;
    };

    if timeout(UPSTREAM_CLOSE_TIMEOUT, closing).await.is_err() {
        warn!(
            %session_id,
            timeout_secs = UPSTREAM_CLOSE_TIMEOUT.as_secs(),
            "Timed out closing upstream connection, dropping it"
        );
        task.abort();
    }
}

/// Flush frames still queued for the client, then release its sink
async fn drain_client(session_id: Uuid, writer: Writer, send_close: bool) {
    let Writer { queue, mut task } = writer;

    let draining = async {
        if send_close {
            let _ = queue.send(RelayMessage::Close).await;
        }
        drop(queue);
        let _ = (&mut task).await;
    };

    if timeout(CLIENT_DRAIN_TIMEOUT, draining).await.is_err() {
        debug!(%session_id, "Client not reading, abandoning queued frames");
        task.abort();
    }
}
