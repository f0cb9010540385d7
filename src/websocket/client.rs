// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! WebSocket client with a persistent connection supervisor for the LedgerX feed.
//!
//! The supervisor task owns connection (re)establishment and the keepalive timer; a
//! read task per connection generation decodes inbound frames onto the bounded event
//! channel. Either side of a failed connection raises a reconnect signal; signals are
//! coalesced so concurrent failures produce exactly one reconnect cycle. Reconnects
//! retry indefinitely with a fixed backoff until stop is requested.

use std::{
    fmt::Debug,
    sync::{
        Arc,
        atomic::{AtomicU8, Ordering},
    },
    time::Duration,
};

use arc_swap::ArcSwapOption;
use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use tokio::{
    net::TcpStream,
    sync::{Mutex, mpsc},
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message,
};
use tokio_util::sync::CancellationToken;

use super::{
    ConnectionMode,
    error::LedgerXWsError,
    messages::LedgerXEvent,
    parse::{self, Decoded},
};
use crate::{common::consts::WS_KEEPALIVE_MSG, config::LedgerXConfig};

/// Bounded wait applied when joining spawned tasks during reconnect and shutdown.
const TASK_JOIN_TIMEOUT: Duration = Duration::from_secs(2);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsWriter = SplitSink<WsStream, Message>;
type WsReader = SplitStream<WsStream>;

/// Owns the write half of one connection generation.
///
/// The read half is moved into that generation's read task; the handle itself is
/// published through an atomically swappable reference so the keepalive arm always
/// reloads the current generation rather than caching a stale one.
struct ConnectionHandle {
    writer: Mutex<WsWriter>,
}

impl ConnectionHandle {
    fn new(writer: WsWriter) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    async fn send_text(&self, text: &str) -> Result<(), LedgerXWsError> {
        let mut writer = self.writer.lock().await;
        writer
            .send(Message::text(text))
            .await
            .map_err(|e| LedgerXWsError::ConnectionError(e.to_string()))
    }

    async fn close(&self) -> Result<(), LedgerXWsError> {
        let mut writer = self.writer.lock().await;
        writer
            .close()
            .await
            .map_err(|e| LedgerXWsError::ConnectionError(e.to_string()))
    }
}

/// Establishes the duplex connection.
///
/// The handshake response (including any HTTP body accompanying the upgrade) is
/// released immediately regardless of outcome.
async fn dial(url: &str) -> Result<(WsWriter, WsReader), LedgerXWsError> {
    let (stream, response) = connect_async(url)
        .await
        .map_err(|e| LedgerXWsError::ConnectionError(e.to_string()))?;
    drop(response);
    Ok(stream.split())
}

/// WebSocket client for the LedgerX streaming feed.
///
/// Decoded events are delivered in receive order within one connection generation.
/// Across a reconnect no ordering or gap guarantee holds; the consumer must tolerate
/// missed messages.
pub struct LedgerXWebSocketClient {
    config: LedgerXConfig,
    connection: Arc<ArcSwapOption<ConnectionHandle>>,
    mode: Arc<AtomicU8>,
    stop: CancellationToken,
    event_rx: Option<mpsc::Receiver<LedgerXEvent>>,
    supervisor_handle: Option<JoinHandle<()>>,
}

impl Debug for LedgerXWebSocketClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(LedgerXWebSocketClient))
            .field("ws_url", &self.config.ws_url)
            .field("has_credentials", &self.config.has_credentials())
            .field("mode", &ConnectionMode::from_u8(self.mode.load(Ordering::Acquire)))
            .finish()
    }
}

impl LedgerXWebSocketClient {
    /// Creates a new [`LedgerXWebSocketClient`] instance.
    #[must_use]
    pub fn new(config: LedgerXConfig) -> Self {
        Self {
            config,
            connection: Arc::new(ArcSwapOption::empty()),
            mode: Arc::new(AtomicU8::new(ConnectionMode::Closed.as_u8())),
            stop: CancellationToken::new(),
            event_rx: None,
            supervisor_handle: None,
        }
    }

    /// Returns the configured WebSocket URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.config.ws_url
    }

    /// Returns whether a live connection generation is currently being read.
    #[must_use]
    pub fn is_active(&self) -> bool {
        ConnectionMode::from_u8(self.mode.load(Ordering::Acquire)) == ConnectionMode::Active
            && !self.stop.is_cancelled()
    }

    /// Returns whether a reconnect cycle is pending or in flight.
    #[must_use]
    pub fn is_reconnecting(&self) -> bool {
        ConnectionMode::from_u8(self.mode.load(Ordering::Acquire)) == ConnectionMode::Reconnecting
            && !self.stop.is_cancelled()
    }

    /// Returns whether the client is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        ConnectionMode::from_u8(self.mode.load(Ordering::Acquire)) == ConnectionMode::Closed
            || self.stop.is_cancelled()
    }

    /// Establishes the connection and starts the supervisor and read loops.
    ///
    /// The very first dial is not retried: its failure is returned to the caller.
    /// Automatic reconnection begins only after at least one successful connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the client is already connected, has been closed, or if the
    /// initial dial fails (network failure, handshake failure, non-success upgrade
    /// response).
    pub async fn connect(&mut self) -> Result<(), LedgerXWsError> {
        if self.supervisor_handle.is_some() {
            return Err(LedgerXWsError::ConnectionError(
                "already connected".to_string(),
            ));
        }
        if self.stop.is_cancelled() {
            // Closed is terminal; a new client must be constructed to reconnect.
            return Err(LedgerXWsError::Disconnected("client closed".to_string()));
        }

        tracing::debug!("Connecting to {}", self.config.ws_url);

        let (writer, reader) = dial(&self.config.ws_connect_url()).await?;
        self.connection
            .store(Some(Arc::new(ConnectionHandle::new(writer))));
        self.mode
            .store(ConnectionMode::Active.as_u8(), Ordering::Release);

        let (event_tx, event_rx) = mpsc::channel::<LedgerXEvent>(self.config.event_channel_capacity);
        self.event_rx = Some(event_rx);

        // Capacity one plus try_send on the producer side coalesces concurrent
        // reconnect requests into a single pending cycle.
        let (reconnect_tx, reconnect_rx) = mpsc::channel::<()>(1);

        let supervisor = Supervisor {
            config: self.config.clone(),
            connection: Arc::clone(&self.connection),
            mode: Arc::clone(&self.mode),
            stop: self.stop.clone(),
            event_tx,
            reconnect_tx,
            reconnect_rx,
            read_task: None,
            generation: 0,
        };
        self.supervisor_handle = Some(tokio::spawn(supervisor.run(reader)));

        tracing::debug!("WebSocket connected successfully");
        Ok(())
    }

    /// Returns a stream of decoded events.
    ///
    /// The stream ends after [`close`](Self::close) once any already-queued events
    /// have been drained.
    ///
    /// # Panics
    ///
    /// Panics if called more than once or before connecting.
    pub fn stream(&mut self) -> impl futures_util::Stream<Item = LedgerXEvent> + use<> {
        let mut rx = self
            .event_rx
            .take()
            .expect("Stream receiver already taken or client not connected");

        async_stream::stream! {
            while let Some(event) = rx.recv().await {
                yield event;
            }
        }
    }

    /// Takes direct ownership of the event receiver.
    pub fn take_event_rx(&mut self) -> Option<mpsc::Receiver<LedgerXEvent>> {
        self.event_rx.take()
    }

    /// Stops all loops and closes the connection.
    ///
    /// Always succeeds from the caller's perspective: a failure to close an
    /// already-broken transport is reported but does not block shutdown. The spawned
    /// tasks are joined with a bounded wait and aborted on overrun.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` is reserved for API stability.
    pub async fn close(&mut self) -> Result<(), LedgerXWsError> {
        tracing::debug!("Closing WebSocket client");

        self.stop.cancel();

        if let Some(handle) = self.supervisor_handle.take() {
            let abort_handle = handle.abort_handle();
            match tokio::time::timeout(TASK_JOIN_TIMEOUT, handle).await {
                Ok(Ok(())) => tracing::debug!("Supervisor completed gracefully"),
                Ok(Err(e)) => tracing::error!("Supervisor join error: {e}"),
                Err(_) => {
                    tracing::warn!("Supervisor did not complete within timeout, aborting");
                    abort_handle.abort();
                }
            }
        }

        self.mode
            .store(ConnectionMode::Closed.as_u8(), Ordering::Release);

        Ok(())
    }
}

/// Requests a reconnect cycle, coalescing with any cycle already pending.
fn request_reconnect(reconnect_tx: &mpsc::Sender<()>) {
    let _ = reconnect_tx.try_send(());
}

/// Control loop owning connection (re)establishment and the keepalive timer.
struct Supervisor {
    config: LedgerXConfig,
    connection: Arc<ArcSwapOption<ConnectionHandle>>,
    mode: Arc<AtomicU8>,
    stop: CancellationToken,
    event_tx: mpsc::Sender<LedgerXEvent>,
    reconnect_tx: mpsc::Sender<()>,
    reconnect_rx: mpsc::Receiver<()>,
    read_task: Option<(CancellationToken, JoinHandle<()>)>,
    generation: u64,
}

impl Supervisor {
    async fn run(mut self, initial_reader: WsReader) {
        let keepalive_interval = Duration::from_millis(self.config.heartbeat_interval_ms);
        let mut keepalive = tokio::time::interval_at(
            tokio::time::Instant::now() + keepalive_interval,
            keepalive_interval,
        );
        keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.spawn_read_task(initial_reader);

        loop {
            tokio::select! {
                _ = self.stop.cancelled() => break,
                Some(()) = self.reconnect_rx.recv() => {
                    self.reconnect(&mut keepalive).await;
                    if self.stop.is_cancelled() {
                        break;
                    }
                }
                _ = keepalive.tick() => {
                    self.send_keepalive().await;
                }
            }
        }

        self.shutdown().await;
    }

    /// Performs one reconnect cycle: retire the failed generation, then re-dial with a
    /// fixed backoff until success or stop.
    async fn reconnect(&mut self, keepalive: &mut tokio::time::Interval) {
        self.mode
            .store(ConnectionMode::Reconnecting.as_u8(), Ordering::Release);

        // Retire the previous generation before re-dialing: at most one live handle
        // and one read loop may exist at any instant.
        self.join_read_task().await;
        if let Some(old) = self.connection.swap(None) {
            if let Err(e) = old.close().await {
                tracing::debug!("Error closing stale connection: {e}");
            }
        }

        loop {
            tokio::select! {
                _ = self.stop.cancelled() => return,
                _ = tokio::time::sleep(Duration::from_millis(self.config.reconnect_delay_ms)) => {}
            }

            tracing::warn!("Reconnecting to {}", self.config.ws_url);

            match dial(&self.config.ws_connect_url()).await {
                Ok((writer, reader)) => {
                    self.connection
                        .store(Some(Arc::new(ConnectionHandle::new(writer))));

                    // Signals raised while this cycle was in flight requested work the
                    // cycle has already performed; coalesce rather than queue them.
                    while self.reconnect_rx.try_recv().is_ok() {}

                    self.spawn_read_task(reader);
                    keepalive.reset();
                    self.mode
                        .store(ConnectionMode::Active.as_u8(), Ordering::Release);
                    tracing::info!("Reconnected (generation {})", self.generation);
                    return;
                }
                Err(e) => {
                    // Retry indefinitely with fixed backoff; bounded only by stop.
                    tracing::error!("Reconnect dial failed: {e}");
                }
            }
        }
    }

    fn spawn_read_task(&mut self, reader: WsReader) {
        self.generation += 1;
        let token = self.stop.child_token();
        let handle = tokio::spawn(read_loop(
            reader,
            token.clone(),
            self.event_tx.clone(),
            self.reconnect_tx.clone(),
            Duration::from_millis(self.config.read_timeout_ms),
            self.generation,
        ));
        self.read_task = Some((token, handle));
    }

    async fn join_read_task(&mut self) {
        if let Some((token, handle)) = self.read_task.take() {
            token.cancel();
            match tokio::time::timeout(TASK_JOIN_TIMEOUT, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("Read task join error: {e}"),
                Err(_) => tracing::warn!("Timeout joining read task"),
            }
        }
    }

    async fn send_keepalive(&self) {
        // Reload the current handle on every tick; a concurrent replacement must be
        // observed rather than a cached generation reused.
        let Some(handle) = self.connection.load_full() else {
            return;
        };

        let send_timeout = Duration::from_millis(self.config.heartbeat_interval_ms);
        match tokio::time::timeout(send_timeout, handle.send_text(WS_KEEPALIVE_MSG)).await {
            Ok(Ok(())) => tracing::trace!("client->server: {WS_KEEPALIVE_MSG}"),
            Ok(Err(e)) => {
                tracing::warn!("Keepalive send failed: {e}");
                request_reconnect(&self.reconnect_tx);
            }
            Err(_) => {
                tracing::warn!("Keepalive send timed out on stale handle");
                request_reconnect(&self.reconnect_tx);
            }
        }
    }

    async fn shutdown(&mut self) {
        self.mode
            .store(ConnectionMode::Closed.as_u8(), Ordering::Release);

        self.join_read_task().await;

        if let Some(connection) = self.connection.swap(None) {
            if let Err(e) = connection.close().await {
                // Tolerated: the transport may already be broken.
                tracing::debug!("Error closing connection during shutdown: {e}");
            }
        }

        tracing::debug!("Supervisor exited");
    }
}

enum FrameOutcome {
    Continue,
    ConnectionClosed,
    Stopped,
}

/// Reads frames for one connection generation until stop or a read failure.
///
/// A receive exceeding the rolling deadline is treated as a read error. Decode errors
/// are reported and skipped; they never terminate the loop. On any read failure the
/// loop emits exactly one reconnect signal and exits without touching the known-bad
/// handle again.
async fn read_loop(
    mut reader: WsReader,
    token: CancellationToken,
    event_tx: mpsc::Sender<LedgerXEvent>,
    reconnect_tx: mpsc::Sender<()>,
    read_timeout: Duration,
    generation: u64,
) {
    tracing::debug!("Read loop started (generation {generation})");

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            received = tokio::time::timeout(read_timeout, reader.next()) => {
                match received {
                    Err(_) => {
                        tracing::warn!("Read deadline elapsed (generation {generation})");
                        request_reconnect(&reconnect_tx);
                        break;
                    }
                    Ok(None) => {
                        tracing::warn!("Stream ended (generation {generation})");
                        request_reconnect(&reconnect_tx);
                        break;
                    }
                    Ok(Some(Err(e))) => {
                        tracing::error!("Read error (generation {generation}): {e}");
                        request_reconnect(&reconnect_tx);
                        break;
                    }
                    Ok(Some(Ok(msg))) => match handle_frame(msg, &token, &event_tx).await {
                        FrameOutcome::Continue => {}
                        FrameOutcome::ConnectionClosed => {
                            request_reconnect(&reconnect_tx);
                            break;
                        }
                        FrameOutcome::Stopped => break,
                    },
                }
            }
        }
    }

    tracing::debug!("Read loop exited (generation {generation})");
}

async fn handle_frame(
    msg: Message,
    token: &CancellationToken,
    event_tx: &mpsc::Sender<LedgerXEvent>,
) -> FrameOutcome {
    match msg {
        Message::Text(text) => decode_and_forward(text.as_bytes(), token, event_tx).await,
        Message::Binary(data) => decode_and_forward(&data, token, event_tx).await,
        Message::Ping(_) | Message::Pong(_) => {
            tracing::trace!("Received ping/pong");
            FrameOutcome::Continue
        }
        Message::Close(frame) => {
            tracing::warn!("Server closed connection: {frame:?}");
            FrameOutcome::ConnectionClosed
        }
        Message::Frame(_) => FrameOutcome::Continue,
    }
}

async fn decode_and_forward(
    data: &[u8],
    token: &CancellationToken,
    event_tx: &mpsc::Sender<LedgerXEvent>,
) -> FrameOutcome {
    tracing::trace!("server->client: {}", String::from_utf8_lossy(data));

    match parse::decode(data) {
        Ok(Decoded::Event(event)) => {
            // Enqueue may block when the channel is at capacity: a slow consumer
            // stalls ingestion rather than dropping data.
            tokio::select! {
                _ = token.cancelled() => FrameOutcome::Stopped,
                result = event_tx.send(event) => {
                    if result.is_err() {
                        tracing::debug!("Event channel closed");
                        FrameOutcome::Stopped
                    } else {
                        FrameOutcome::Continue
                    }
                }
            }
        }
        Ok(Decoded::Ack(channel)) => {
            tracing::trace!("Acknowledged {channel:?} frame");
            FrameOutcome::Continue
        }
        Err(e) => {
            // Non-fatal to the connection: drop the frame and keep reading.
            tracing::error!("{e}");
            FrameOutcome::Continue
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LedgerXWebSocketClient::new(LedgerXConfig::default());
        assert!(!client.is_active());
        assert!(client.is_closed());
    }

    #[tokio::test]
    async fn test_close_before_connect_is_idempotent() {
        let mut client = LedgerXWebSocketClient::new(LedgerXConfig::default());
        client.close().await.unwrap();
        client.close().await.unwrap();
        assert!(client.is_closed());
    }

    #[tokio::test]
    async fn test_connect_refused_propagates_synchronously() {
        // Nothing listens on this port; the first dial must fail without retrying.
        let config = LedgerXConfig {
            ws_url: "ws://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let mut client = LedgerXWebSocketClient::new(config);
        let result = client.connect().await;
        assert!(matches!(result, Err(LedgerXWsError::ConnectionError(_))));
        assert!(!client.is_active());
    }
}
