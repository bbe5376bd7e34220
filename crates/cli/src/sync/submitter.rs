// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote submitter: performs one acknowledged write per transaction.
//!
//! A submission succeeds only when the server answers the request with an
//! `ack` carrying the same request ID. Every other outcome is reported as a
//! [`SubmitError`] and never escapes as a panic.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use sw_core::protocol::{ClientMessage, ServerMessage};
use sw_core::{CategorySet, TransactionRecord};
use tokio::sync::Mutex;
use tracing::debug;

use super::transport::{Transport, TransportError, WebSocketTransport};

/// Why a remote write did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The remote could not be reached or the connection dropped.
    #[error("network error: {0}")]
    Network(String),

    /// The remote answered and refused the write.
    #[error("rejected by remote: {0}")]
    Rejected(String),

    /// No answer arrived in time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl SubmitError {
    /// Returns true if the remote explicitly refused the write.
    pub fn is_rejection(&self) -> bool {
        matches!(self, SubmitError::Rejected(_))
    }
}

impl From<TransportError> for SubmitError {
    fn from(e: TransportError) -> Self {
        SubmitError::Network(e.to_string())
    }
}

/// Boxed future returned by [`Submitter`] methods.
pub type SubmitFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SubmitError>> + Send + 'a>>;

/// Performs one remote write.
///
/// Implementations do not deduplicate; callers must not re-submit a record
/// that has already been confirmed.
pub trait Submitter: Send + Sync {
    /// Submit a record, resolving once the remote has acknowledged it.
    fn submit<'a>(&'a self, record: &'a TransactionRecord) -> SubmitFuture<'a, ()>;
}

impl<S: Submitter + ?Sized> Submitter for std::sync::Arc<S> {
    fn submit<'a>(&'a self, record: &'a TransactionRecord) -> SubmitFuture<'a, ()> {
        (**self).submit(record)
    }
}

/// Configuration for the remote submitter.
#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    /// URL of the remote server.
    pub url: String,
    /// Maximum time to establish a connection.
    pub connect_timeout: Duration,
    /// Maximum time to wait for the reply to one request.
    pub submit_timeout: Duration,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        SubmitterConfig {
            url: "ws://localhost:7890".to_string(),
            connect_timeout: Duration::from_secs(2),
            submit_timeout: Duration::from_secs(5),
        }
    }
}

/// Submitter that talks to `sw-remote` over a [`Transport`].
///
/// Connects lazily on the first request and reconnects after any failure.
/// Requests are serialized: one exchange is in flight at a time.
pub struct RemoteSubmitter<T: Transport = WebSocketTransport> {
    config: SubmitterConfig,
    link: Mutex<Link<T>>,
}

struct Link<T> {
    transport: T,
    next_id: u64,
}

impl RemoteSubmitter<WebSocketTransport> {
    /// Create a submitter using the WebSocket transport.
    pub fn new(config: SubmitterConfig) -> Self {
        Self::with_transport(config, WebSocketTransport::new())
    }
}

impl<T: Transport> RemoteSubmitter<T> {
    /// Create a submitter with a custom transport (for testing).
    pub fn with_transport(config: SubmitterConfig, transport: T) -> Self {
        RemoteSubmitter {
            config,
            link: Mutex::new(Link {
                transport,
                next_id: 0,
            }),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SubmitterConfig {
        &self.config
    }

    /// Ask the remote for its allowed category lists.
    pub async fn fetch_categories(&self) -> Result<CategorySet, SubmitError> {
        match self.request(ClientMessage::get_categories).await? {
            ServerMessage::Categories { categories, .. } => Ok(categories.normalized()),
            other => Err(unexpected(&other)),
        }
    }

    /// Close the connection, if any.
    pub async fn disconnect(&self) {
        let mut link = self.link.lock().await;
        close_quietly(&mut link.transport).await;
    }

    /// Send one request and wait for the reply carrying its ID.
    async fn request<F>(&self, build: F) -> Result<ServerMessage, SubmitError>
    where
        F: FnOnce(u64) -> ClientMessage + Send,
    {
        let mut link = self.link.lock().await;
        link.next_id += 1;
        let id = link.next_id;

        if !link.transport.is_open() {
            let connect = link.transport.connect(&self.config.url);
            match tokio::time::timeout(self.config.connect_timeout, connect).await {
                Ok(Ok(())) => debug!("connected to {}", self.config.url),
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => return Err(SubmitError::Timeout(self.config.connect_timeout)),
            }
        }

        if let Err(e) = link.transport.send(build(id)).await {
            close_quietly(&mut link.transport).await;
            return Err(e.into());
        }

        let reply = tokio::time::timeout(
            self.config.submit_timeout,
            await_reply(&mut link.transport, id),
        )
        .await;

        match reply {
            Ok(Ok(msg)) => Ok(msg),
            Ok(Err(e)) => {
                if !e.is_rejection() {
                    close_quietly(&mut link.transport).await;
                }
                Err(e)
            }
            Err(_) => {
                // A late reply must not be mistaken for the next request's.
                close_quietly(&mut link.transport).await;
                Err(SubmitError::Timeout(self.config.submit_timeout))
            }
        }
    }
}

impl<T: Transport> Submitter for RemoteSubmitter<T> {
    fn submit<'a>(&'a self, record: &'a TransactionRecord) -> SubmitFuture<'a, ()> {
        Box::pin(async move {
            let reply = self
                .request(|id| ClientMessage::add_transaction(id, record.clone()))
                .await?;
            match reply {
                ServerMessage::Ack { .. } => Ok(()),
                ServerMessage::Rejected { reason, .. } => Err(SubmitError::Rejected(reason)),
                other => Err(unexpected(&other)),
            }
        })
    }
}

async fn await_reply<T: Transport>(transport: &mut T, id: u64) -> Result<ServerMessage, SubmitError> {
    loop {
        match transport.recv().await? {
            Some(msg) if msg.reply_to() == Some(id) => return Ok(msg),
            // Requests are serialized, so an untagged error answers ours.
            Some(ServerMessage::Error { message }) => return Err(SubmitError::Rejected(message)),
            Some(other) => debug!("ignoring unrelated message: {:?}", other),
            None => return Err(SubmitError::Network("connection closed".to_string())),
        }
    }
}

/// Close the link when its state is unknown. A failed close changes nothing.
async fn close_quietly<T: Transport>(transport: &mut T) {
    if let Err(e) = transport.close().await {
        debug!("closing connection: {}", e);
    }
}

fn unexpected(msg: &ServerMessage) -> SubmitError {
    SubmitError::Network(format!("unexpected reply: {:?}", msg))
}
