// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket server implementation.
//!
//! Each connection is served by its own task. Requests on one connection are
//! handled in order and every request gets exactly one reply.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use sw_core::protocol::{ClientMessage, ServerMessage};

use crate::state::{RecordError, ServerState};

/// Run the WebSocket server on the given address.
pub async fn run(addr: SocketAddr, state: ServerState) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on: {}", listener.local_addr()?);
    serve(listener, state).await?;
    Ok(())
}

/// Accept connections on an already-bound listener.
pub async fn serve(listener: TcpListener, state: ServerState) -> std::io::Result<()> {
    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let state = state.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }
}

/// Handle a single WebSocket connection.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: ServerState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    info!("New WebSocket connection from: {}", peer_addr);

    let (mut ws_sink, mut ws_stream) = ws_stream.split();

    while let Some(msg) = ws_stream.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let response = handle_client_message(&text, &state).await;
                ws_sink.send(Message::Text(response.to_json()?.into())).await?;
            }
            Ok(Message::Close(_)) => {
                info!("Client {} disconnected", peer_addr);
                break;
            }
            Ok(Message::Ping(data)) => {
                ws_sink.send(Message::Pong(data)).await?;
            }
            Ok(_) => {
                // Binary, Pong and raw frames carry no requests
            }
            Err(e) => {
                warn!("WebSocket error from {}: {}", peer_addr, e);
                break;
            }
        }
    }

    info!("Connection closed: {}", peer_addr);
    Ok(())
}

/// Process a client message and build its reply.
pub(crate) async fn handle_client_message(text: &str, state: &ServerState) -> ServerMessage {
    let msg = match ClientMessage::from_json(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!("Unparseable message: {}", e);
            return ServerMessage::error(format!("invalid message: {}", e));
        }
    };
    debug!("Received message: {:?}", msg);

    match msg {
        ClientMessage::AddTransaction { id, record } => match state.record(&record).await {
            Ok(()) => {
                info!(
                    "Recorded {} {} {} (request {}, {} since startup)",
                    record.kind,
                    record.category,
                    record.amount,
                    id,
                    state.accepted()
                );
                ServerMessage::ack(id)
            }
            Err(RecordError::Invalid(e)) => {
                info!("Rejected request {}: {}", id, e);
                ServerMessage::rejected(id, e.to_string())
            }
            Err(e @ RecordError::Storage(_)) => {
                error!("Failed to record request {}: {}", id, e);
                ServerMessage::rejected(id, e.to_string())
            }
        },

        ClientMessage::GetCategories { id } => {
            debug!("Categories requested: {}", id);
            ServerMessage::categories(id, state.categories().clone())
        }

        ClientMessage::Ping { id } => {
            debug!("Ping received: {}", id);
            ServerMessage::pong(id)
        }
    }
}
