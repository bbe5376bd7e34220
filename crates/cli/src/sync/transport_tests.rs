// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the transport module.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::transport::{Transport, TransportError, TransportFuture, WebSocketTransport};
use futures_util::{SinkExt, StreamExt};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use sw_core::protocol::{ClientMessage, ServerMessage};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

type Responder = Box<dyn FnMut(&ClientMessage) -> Option<ServerMessage> + Send>;

/// Mock transport for testing without real sockets.
///
/// Every sent message is recorded and passed to a responder whose reply (if
/// any) is queued for the next `recv()`. Handles are shared, so a test can
/// keep a clone to inspect traffic after moving the transport into a client.
#[derive(Clone)]
pub struct MockTransport {
    connected: Arc<AtomicBool>,
    /// Messages that will be returned by recv().
    incoming: Arc<Mutex<VecDeque<ServerMessage>>>,
    /// Messages that were sent via send().
    outgoing: Arc<Mutex<Vec<ClientMessage>>>,
    responder: Arc<Mutex<Responder>>,
    connect_should_fail: Arc<AtomicBool>,
    send_should_fail: Arc<AtomicBool>,
    connects: Arc<AtomicUsize>,
}

impl MockTransport {
    /// A transport whose server acknowledges everything.
    pub fn new() -> Self {
        Self::with_responder(ack_all)
    }

    /// A transport whose server replies using `responder`.
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: FnMut(&ClientMessage) -> Option<ServerMessage> + Send + 'static,
    {
        MockTransport {
            connected: Arc::new(AtomicBool::new(false)),
            incoming: Arc::new(Mutex::new(VecDeque::new())),
            outgoing: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(Mutex::new(Box::new(responder) as Responder)),
            connect_should_fail: Arc::new(AtomicBool::new(false)),
            send_should_fail: Arc::new(AtomicBool::new(false)),
            connects: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Add a message that will be returned by recv().
    pub fn queue_incoming(&self, msg: ServerMessage) {
        self.incoming.lock().unwrap().push_back(msg);
    }

    /// Get all messages that were sent.
    pub fn get_outgoing(&self) -> Vec<ClientMessage> {
        self.outgoing.lock().unwrap().clone()
    }

    /// Set whether connect should fail.
    pub fn set_connect_fail(&self, fail: bool) {
        self.connect_should_fail.store(fail, Ordering::SeqCst);
    }

    /// Set whether send should fail.
    pub fn set_send_fail(&self, fail: bool) {
        self.send_should_fail.store(fail, Ordering::SeqCst);
    }

    /// Number of successful connects.
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

/// Responder that acknowledges every request.
pub fn ack_all(msg: &ClientMessage) -> Option<ServerMessage> {
    match msg {
        ClientMessage::AddTransaction { id, .. } => Some(ServerMessage::ack(*id)),
        ClientMessage::GetCategories { id } => Some(ServerMessage::categories(
            *id,
            sw_core::CategorySet::new(["food", "rent"], ["salary"]),
        )),
        ClientMessage::Ping { id } => Some(ServerMessage::pong(*id)),
    }
}

impl Transport for MockTransport {
    fn connect(&mut self, _url: &str) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            if self.connect_should_fail.load(Ordering::SeqCst) {
                Err(TransportError::Connect("mock failure".into()))
            } else {
                self.connected.store(true, Ordering::SeqCst);
                self.connects.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
    }

    fn close(&mut self) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            self.connected.store(false, Ordering::SeqCst);
            Ok(())
        })
    }

    fn send(&mut self, msg: ClientMessage) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            if !self.connected.load(Ordering::SeqCst) {
                return Err(TransportError::NotConnected);
            }
            if self.send_should_fail.load(Ordering::SeqCst) {
                self.connected.store(false, Ordering::SeqCst);
                return Err(TransportError::Send("mock failure".into()));
            }
            let reply = {
                let mut responder = self.responder.lock().unwrap();
                (*responder)(&msg)
            };
            self.outgoing.lock().unwrap().push(msg);
            if let Some(reply) = reply {
                self.incoming.lock().unwrap().push_back(reply);
            }
            Ok(())
        })
    }

    fn recv(&mut self) -> TransportFuture<'_, Option<ServerMessage>> {
        Box::pin(async move {
            let msg = self.incoming.lock().unwrap().pop_front();
            Ok(msg)
        })
    }

    fn is_open(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[tokio::test]
async fn test_mock_transport_connect() {
    let mut transport = MockTransport::new();
    assert!(!transport.is_open());

    transport.connect("ws://localhost:1234").await.unwrap();
    assert!(transport.is_open());

    transport.close().await.unwrap();
    assert!(!transport.is_open());
}

#[tokio::test]
async fn test_mock_transport_send_recv() {
    let mut transport = MockTransport::new();
    transport.connect("ws://localhost:1234").await.unwrap();

    transport.send(ClientMessage::ping(42)).await.unwrap();

    let outgoing = transport.get_outgoing();
    assert_eq!(outgoing.len(), 1);
    assert!(matches!(outgoing[0], ClientMessage::Ping { id: 42 }));

    // The responder queued a pong
    let received = transport.recv().await.unwrap();
    assert!(matches!(received, Some(ServerMessage::Pong { id: 42 })));

    // No more messages
    let received = transport.recv().await.unwrap();
    assert!(received.is_none());
}

#[tokio::test]
async fn test_mock_transport_connect_fail() {
    let mut transport = MockTransport::new();
    transport.set_connect_fail(true);

    let result = transport.connect("ws://localhost:1234").await;
    assert!(result.is_err());
    assert!(!transport.is_open());
}

#[tokio::test]
async fn test_mock_transport_send_requires_connection() {
    let mut transport = MockTransport::new();
    let result = transport.send(ClientMessage::ping(1)).await;
    assert!(matches!(result, Err(TransportError::NotConnected)));
}

#[test]
fn test_websocket_transport_starts_closed() {
    assert!(!WebSocketTransport::new().is_open());
}

/// Serve one WebSocket client that receives `frames` after its first request.
async fn scripted_server(frames: Vec<Message>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        if ws.next().await.is_none() {
            return;
        }
        for frame in frames {
            if ws.send(frame).await.is_err() {
                return;
            }
        }
        // Keep the socket up until the client goes away.
        while let Some(Ok(_)) = ws.next().await {}
    });
    format!("ws://{}", addr)
}

async fn connected(url: &str) -> WebSocketTransport {
    let mut transport = WebSocketTransport::new();
    transport.connect(url).await.unwrap();
    transport.send(ClientMessage::ping(1)).await.unwrap();
    transport
}

#[tokio::test]
async fn test_websocket_skips_control_frames() {
    let pong = ServerMessage::pong(1).to_json().unwrap();
    let url = scripted_server(vec![
        Message::Ping(vec![9].into()),
        Message::Binary(vec![1, 2].into()),
        Message::Text(pong.into()),
    ])
    .await;
    let mut transport = connected(&url).await;

    let reply = transport.recv().await.unwrap();
    assert!(matches!(reply, Some(ServerMessage::Pong { id: 1 })));
    assert!(transport.is_open());
    transport.close().await.unwrap();
}

#[tokio::test]
async fn test_websocket_undecodable_reply_closes_link() {
    let url = scripted_server(vec![Message::Text("{not json".into())]).await;
    let mut transport = connected(&url).await;

    let result = transport.recv().await;
    assert!(matches!(result, Err(TransportError::Malformed(_))));
    assert!(!transport.is_open());

    let result = transport.recv().await;
    assert!(matches!(result, Err(TransportError::NotConnected)));
}

#[tokio::test]
async fn test_websocket_close_frame_ends_stream() {
    let url = scripted_server(vec![Message::Close(None)]).await;
    let mut transport = connected(&url).await;

    assert!(transport.recv().await.unwrap().is_none());
    assert!(!transport.is_open());
}

#[tokio::test]
async fn test_websocket_close_is_idempotent() {
    let url = scripted_server(Vec::new()).await;
    let mut transport = connected(&url).await;

    transport.close().await.unwrap();
    assert!(!transport.is_open());
    transport.close().await.unwrap();
}

#[tokio::test]
async fn test_websocket_connect_refused() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let mut transport = WebSocketTransport::new();

    let result = transport.connect(&format!("ws://127.0.0.1:{}", port)).await;
    assert!(matches!(result, Err(TransportError::Connect(_))));
    assert!(!transport.is_open());
}
