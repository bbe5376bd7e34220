// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Test infrastructure for command testing.
//!
//! [`TestContext`] initializes a throwaway `.spendwise/` directory and
//! [`FakeLedger`] serves the WebSocket protocol on a local port, so command
//! logic runs end to end without a real `sw-remote`.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use sw_core::protocol::{ClientMessage, ServerMessage};
use sw_core::{CategorySet, TransactionRecord};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use super::*;
use crate::config::init_data_dir;

/// Test context backed by a temporary data directory.
pub struct TestContext {
    pub ctx: Context,
    _temp_dir: TempDir,
}

impl TestContext {
    /// A data directory whose remote is `url`.
    pub fn with_remote(url: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = init_data_dir(temp_dir.path(), url).unwrap();
        let config = Config::load(&data_dir).unwrap();
        TestContext {
            ctx: Context { data_dir, config },
            _temp_dir: temp_dir,
        }
    }

    /// A data directory whose remote port has nothing listening.
    pub fn unreachable() -> Self {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        Self::with_remote(&format!("ws://127.0.0.1:{}", port))
    }

    pub fn pending(&self) -> Vec<TransactionRecord> {
        self.ctx.open_queue().unwrap().peek_all().unwrap()
    }

    pub fn write_category_cache(&self, set: &CategorySet) {
        crate::categories::CategoryCache::new(&config::categories_path(&self.ctx.data_dir))
            .store(set)
            .unwrap();
    }
}

/// Minimal in-process ledger speaking the client protocol.
pub struct FakeLedger {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<TransactionRecord>>>,
    category_requests: Arc<AtomicUsize>,
}

impl FakeLedger {
    /// Start a ledger that accepts everything and offers `categories`.
    pub async fn start(categories: CategorySet) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));
        let category_requests = Arc::new(AtomicUsize::new(0));

        let state = (Arc::clone(&received), Arc::clone(&category_requests));
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let (received, category_requests) = (Arc::clone(&state.0), Arc::clone(&state.1));
                let categories = categories.clone();
                tokio::spawn(async move {
                    let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else {
                        return;
                    };
                    while let Some(Ok(Message::Text(text))) = ws.next().await {
                        let reply = match ClientMessage::from_json(&text).unwrap() {
                            ClientMessage::AddTransaction { id, record } => {
                                received.lock().unwrap().push(record);
                                ServerMessage::ack(id)
                            }
                            ClientMessage::GetCategories { id } => {
                                category_requests.fetch_add(1, Ordering::SeqCst);
                                ServerMessage::categories(id, categories.clone())
                            }
                            ClientMessage::Ping { id } => ServerMessage::pong(id),
                        };
                        let json = reply.to_json().unwrap();
                        if ws.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                });
            }
        });

        FakeLedger {
            addr,
            received,
            category_requests,
        }
    }

    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    pub fn received(&self) -> Vec<TransactionRecord> {
        self.received.lock().unwrap().clone()
    }

    pub fn category_requests(&self) -> usize {
        self.category_requests.load(Ordering::SeqCst)
    }
}

#[test]
fn drain_lock_is_exclusive() {
    let test = TestContext::unreachable();
    let first = acquire_drain_lock(&test.ctx.data_dir).unwrap();

    let err = acquire_drain_lock(&test.ctx.data_dir).unwrap_err();
    assert!(matches!(err, Error::DrainInProgress));

    drop(first);
    acquire_drain_lock(&test.ctx.data_dir).unwrap();
}

#[tokio::test]
async fn detect_online_without_remote_is_offline() {
    assert!(!detect_online(None).await);
}

#[tokio::test]
async fn detect_online_unreachable_port() {
    let test = TestContext::unreachable();
    assert!(!detect_online(test.ctx.config.remote.as_ref()).await);
}

#[tokio::test]
async fn detect_online_reachable_ledger() {
    let ledger = FakeLedger::start(CategorySet::builtin()).await;
    let test = TestContext::with_remote(&ledger.url());
    if !env::force_offline() {
        assert!(detect_online(test.ctx.config.remote.as_ref()).await);
    }
}

#[test]
fn submitter_config_defaults_without_remote() {
    let test = TestContext::unreachable();
    let ctx = Context {
        data_dir: test.ctx.data_dir.clone(),
        config: Config { remote: None },
    };
    assert_eq!(ctx.submitter_config().url, "ws://localhost:7890");
}

#[test]
fn runtime_builds() {
    let rt = runtime().unwrap();
    assert_eq!(rt.block_on(async { 1 + 1 }), 2);
}
