// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for delivering messages to the paired device.
//!
//! Provides a trait-based transport layer that enables:
//! - WebSocket delivery to a phone-side bridge for production
//! - Line-delimited JSON on stdout for dry runs and piping
//! - Mock transports for unit testing
//!
//! A resolved `deliver` future is the acknowledgement: `Ok(())` means the
//! message left this process, `Err` carries the failure message. Callers never
//! retry a failed delivery.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tzlink_core::AppMessage;

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connection closed unexpectedly.
    #[error("connection closed")]
    ConnectionClosed,

    /// Send failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Serialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// The peer did not answer in time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Outbound channel to the paired device.
///
/// Deliveries may be in flight concurrently, so `deliver` takes `&self`.
pub trait Transport: Send + Sync {
    /// Deliver one message and resolve once it is acknowledged.
    fn deliver(
        &self,
        msg: AppMessage,
    ) -> Pin<Box<dyn Future<Output = TransportResult<()>> + Send + '_>>;

    /// Short name used in log lines.
    fn name(&self) -> &'static str;
}

/// Default time allowed for the handshake and for each send.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

type WebSocketConnection =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// WebSocket transport implementation using tokio-tungstenite.
///
/// Connects on first delivery. A broken connection is dropped and
/// re-established on the next delivery; the message that hit the broken
/// connection is not resent.
///
/// The handshake and each send are bounded by a timeout, so a bridge that
/// stops answering holds the connection lock for at most that long.
pub struct WebSocketTransport {
    url: String,
    timeout: Duration,
    /// The WebSocket connection, if connected.
    ws: Mutex<Option<WebSocketConnection>>,
}

impl WebSocketTransport {
    /// Create a new WebSocket transport for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, DEFAULT_SEND_TIMEOUT)
    }

    /// Create a transport with a custom handshake/send timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        WebSocketTransport {
            url: url.into(),
            timeout,
            ws: Mutex::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check if a connection is currently open.
    pub async fn is_connected(&self) -> bool {
        self.ws.lock().await.is_some()
    }
}

impl Transport for WebSocketTransport {
    fn deliver(
        &self,
        msg: AppMessage,
    ) -> Pin<Box<dyn Future<Output = TransportResult<()>> + Send + '_>> {
        Box::pin(async move {
            use futures_util::SinkExt;
            use tokio_tungstenite::tungstenite::Message;

            let json = msg
                .to_json()
                .map_err(|e| TransportError::SerializationError(e.to_string()))?;

            let mut guard = self.ws.lock().await;
            if guard.is_none() {
                let connect = tokio_tungstenite::connect_async(self.url.as_str());
                let (ws_stream, _) = tokio::time::timeout(self.timeout, connect)
                    .await
                    .map_err(|_| TransportError::Timeout(self.timeout))?
                    .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
                *guard = Some(ws_stream);
            }
            let ws = guard.as_mut().ok_or(TransportError::ConnectionClosed)?;

            // Flush to ensure the data is actually sent and we detect connection failures
            let send = async {
                ws.send(Message::Text(json.into())).await?;
                ws.flush().await
            };
            let result = match tokio::time::timeout(self.timeout, send).await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(TransportError::SendFailed(e.to_string())),
                Err(_) => Err(TransportError::Timeout(self.timeout)),
            };
            if result.is_err() {
                // Connection is broken, clear it
                *guard = None;
            }
            result
        })
    }

    fn name(&self) -> &'static str {
        "websocket"
    }
}

/// Writes each message as one JSON line on stdout.
#[derive(Debug, Default)]
pub struct StdoutTransport {
    out: Mutex<()>,
}

impl StdoutTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for StdoutTransport {
    fn deliver(
        &self,
        msg: AppMessage,
    ) -> Pin<Box<dyn Future<Output = TransportResult<()>> + Send + '_>> {
        Box::pin(async move {
            let mut line = msg
                .to_json()
                .map_err(|e| TransportError::SerializationError(e.to_string()))?;
            line.push('\n');

            // Keep concurrent deliveries from interleaving partial lines.
            let _guard = self.out.lock().await;
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(line.as_bytes())
                .await
                .map_err(|e| TransportError::SendFailed(e.to_string()))?;
            stdout
                .flush()
                .await
                .map_err(|e| TransportError::SendFailed(e.to_string()))?;
            Ok(())
        })
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}
