// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the transport module.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::transport::{
    StdoutTransport, Transport, TransportError, TransportResult, WebSocketTransport,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tzlink_core::{AppMessage, Hemisphere, KeyStyle, TimezoneReport};

/// Mock transport for testing without real sockets.
#[derive(Clone)]
pub struct MockTransport {
    /// Messages passed to deliver(), with the instant they arrived.
    delivered: Arc<Mutex<Vec<(Instant, AppMessage)>>>,
    /// Whether deliveries should fail.
    fail_with: Option<String>,
    /// How long each delivery waits before acknowledging.
    ack_delay: Option<Duration>,
    /// Number of deliveries that have resolved.
    acked: Arc<AtomicUsize>,
}

impl MockTransport {
    pub fn new() -> Self {
        MockTransport {
            delivered: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
            ack_delay: None,
            acked: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A transport whose every delivery fails with `message`.
    pub fn failing(message: &str) -> Self {
        MockTransport {
            fail_with: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// A transport that acknowledges each delivery only after `delay`.
    pub fn slow(delay: Duration) -> Self {
        MockTransport {
            ack_delay: Some(delay),
            ..Self::new()
        }
    }

    /// Get all messages that were delivered (or attempted).
    pub fn messages(&self) -> Vec<AppMessage> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Get the instants at which deliveries were attempted.
    pub fn instants(&self) -> Vec<Instant> {
        self.delivered.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }

    /// Number of deliveries whose acknowledgement has resolved.
    pub fn acknowledged(&self) -> usize {
        self.acked.load(Ordering::SeqCst)
    }
}

impl Transport for MockTransport {
    fn deliver(
        &self,
        msg: AppMessage,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = TransportResult<()>> + Send + '_>>
    {
        let delivered = Arc::clone(&self.delivered);
        let fail_with = self.fail_with.clone();
        let ack_delay = self.ack_delay;
        let acked = Arc::clone(&self.acked);
        Box::pin(async move {
            delivered.lock().unwrap().push((Instant::now(), msg));
            if let Some(delay) = ack_delay {
                tokio::time::sleep(delay).await;
            }
            acked.fetch_add(1, Ordering::SeqCst);
            match fail_with {
                Some(message) => Err(TransportError::SendFailed(message)),
                None => Ok(()),
            }
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

fn southern_message() -> AppMessage {
    let report = TimezoneReport::new(-18000, Some(Hemisphere::Southern));
    AppMessage::from_report(&report, KeyStyle::Named)
}

#[tokio::test]
async fn mock_transport_records_messages() {
    let transport = MockTransport::new();
    transport.deliver(southern_message()).await.unwrap();
    assert_eq!(transport.messages(), vec![southern_message()]);
}

#[tokio::test]
async fn mock_transport_failure_carries_message() {
    let transport = MockTransport::failing("watch not connected");
    let err = transport.deliver(southern_message()).await.unwrap_err();
    assert!(err.to_string().contains("watch not connected"));
    assert_eq!(transport.count(), 1);
}

#[tokio::test]
async fn stdout_transport_delivers() {
    let transport = StdoutTransport::new();
    transport.deliver(southern_message()).await.unwrap();
}

#[tokio::test]
async fn websocket_transport_sends_text_frames() {
    use futures_util::StreamExt;
    use tokio::net::TcpListener;
    use tokio_tungstenite::tungstenite::Message;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        let mut received = Vec::new();
        while received.len() < 2 {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => received.push(text.as_str().to_string()),
                Some(Ok(_)) => continue,
                _ => break,
            }
        }
        received
    });

    let transport = WebSocketTransport::new(format!("ws://{addr}"));
    assert!(!transport.is_connected().await);

    transport.deliver(southern_message()).await.unwrap();
    assert!(transport.is_connected().await);

    let report = TimezoneReport::new(3600, None);
    transport
        .deliver(AppMessage::from_report(&report, KeyStyle::Numeric))
        .await
        .unwrap();

    let received = server.await.unwrap();
    assert_eq!(
        received,
        vec![
            r#"{"tz_offset":-18000,"hemisphere":1}"#.to_string(),
            r#"{"10":3600}"#.to_string(),
        ]
    );
}

#[tokio::test]
async fn websocket_transport_reports_connection_failure() {
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = WebSocketTransport::new(format!("ws://{addr}"));
    let err = transport.deliver(southern_message()).await.unwrap_err();
    assert!(matches!(err, TransportError::ConnectionFailed(_)));
    assert!(!transport.is_connected().await);
}

#[tokio::test]
async fn websocket_transport_times_out_stalled_handshake() {
    use tokio::net::TcpListener;

    // Accepts TCP connections but never answers the WebSocket handshake.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let mut held = Vec::new();
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            held.push(stream);
        }
    });

    let timeout = Duration::from_millis(200);
    let transport = WebSocketTransport::with_timeout(format!("ws://{addr}"), timeout);

    let deliveries = async {
        tokio::join!(
            transport.deliver(southern_message()),
            transport.deliver(southern_message()),
        )
    };
    let (first, second) = tokio::time::timeout(Duration::from_secs(5), deliveries)
        .await
        .expect("deliveries must resolve while the bridge is stalled");

    assert!(matches!(first, Err(TransportError::Timeout(t)) if t == timeout));
    assert!(matches!(second, Err(TransportError::Timeout(t)) if t == timeout));
    assert!(!transport.is_connected().await);

    server.abort();
}

#[tokio::test(start_paused = true)]
async fn slow_mock_transport_acknowledges_after_delay() {
    let transport = MockTransport::slow(Duration::from_secs(5));
    let start = Instant::now();
    transport.deliver(southern_message()).await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(5));
    assert_eq!(transport.acknowledged(), 1);
}
