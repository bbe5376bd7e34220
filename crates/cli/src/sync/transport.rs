// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Frame-level link to the remote ledger.
//!
//! A [`Transport`] carries protocol messages and nothing else: request IDs,
//! acknowledgments and timeouts live in
//! [`RemoteSubmitter`](super::RemoteSubmitter). Any failure that leaves the
//! link in an unknown state also closes it, so the next request reconnects
//! from scratch.

use std::future::Future;
use std::pin::Pin;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use sw_core::protocol::{ClientMessage, ServerMessage};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

/// Why a frame could not be moved across the link.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("cannot connect: {0}")]
    Connect(String),

    #[error("not connected")]
    NotConnected,

    #[error("send failed: {0}")]
    Send(String),

    #[error("receive failed: {0}")]
    Receive(String),

    /// The remote sent text that is not a server message.
    #[error("undecodable reply: {0}")]
    Malformed(String),

    #[error("cannot encode request: {0}")]
    Encode(String),
}

pub type TransportResult<T> = Result<T, TransportError>;

/// Boxed future returned by [`Transport`] methods.
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = TransportResult<T>> + Send + 'a>>;

/// Moves [`ClientMessage`]s out and [`ServerMessage`]s in.
pub trait Transport: Send + Sync {
    fn connect(&mut self, url: &str) -> TransportFuture<'_, ()>;

    /// Close the link. Closing an already closed link succeeds.
    fn close(&mut self) -> TransportFuture<'_, ()>;

    fn send(&mut self, msg: ClientMessage) -> TransportFuture<'_, ()>;

    /// Next server message, or `None` once the remote has hung up.
    fn recv(&mut self) -> TransportFuture<'_, Option<ServerMessage>>;

    fn is_open(&self) -> bool;
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

struct Socket {
    sink: SplitSink<WsStream, Message>,
    stream: SplitStream<WsStream>,
}

/// [`Transport`] over a tokio-tungstenite WebSocket.
#[derive(Default)]
pub struct WebSocketTransport {
    socket: Option<Socket>,
}

impl WebSocketTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the socket and report `err`.
    fn fail<T>(&mut self, err: TransportError) -> TransportResult<T> {
        self.socket = None;
        Err(err)
    }
}

impl Transport for WebSocketTransport {
    fn connect(&mut self, url: &str) -> TransportFuture<'_, ()> {
        let url = url.to_string();
        Box::pin(async move {
            let (ws, _) = tokio_tungstenite::connect_async(url.as_str())
                .await
                .map_err(|e| TransportError::Connect(e.to_string()))?;
            let (sink, stream) = ws.split();
            self.socket = Some(Socket { sink, stream });
            Ok(())
        })
    }

    fn close(&mut self) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            let Some(mut socket) = self.socket.take() else {
                return Ok(());
            };
            socket
                .sink
                .close()
                .await
                .map_err(|e| TransportError::Send(e.to_string()))
        })
    }

    fn send(&mut self, msg: ClientMessage) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            let json = msg
                .to_json()
                .map_err(|e| TransportError::Encode(e.to_string()))?;
            let socket = self.socket.as_mut().ok_or(TransportError::NotConnected)?;

            // `send` flushes, so a dead peer surfaces here.
            match socket.sink.send(Message::Text(json.into())).await {
                Ok(()) => Ok(()),
                Err(e) => self.fail(TransportError::Send(e.to_string())),
            }
        })
    }

    fn recv(&mut self) -> TransportFuture<'_, Option<ServerMessage>> {
        Box::pin(async move {
            loop {
                let socket = self.socket.as_mut().ok_or(TransportError::NotConnected)?;
                let frame = match socket.stream.next().await {
                    Some(Ok(frame)) => frame,
                    Some(Err(e)) => return self.fail(TransportError::Receive(e.to_string())),
                    None => {
                        self.socket = None;
                        return Ok(None);
                    }
                };

                match frame {
                    Message::Text(text) => {
                        return match ServerMessage::from_json(&text) {
                            Ok(msg) => Ok(Some(msg)),
                            Err(e) => self.fail(TransportError::Malformed(e.to_string())),
                        };
                    }
                    Message::Close(_) => {
                        self.socket = None;
                        return Ok(None);
                    }
                    // tungstenite answers pings itself; binary frames carry nothing for us.
                    _ => {}
                }
            }
        })
    }

    fn is_open(&self) -> bool {
        self.socket.is_some()
    }
}
