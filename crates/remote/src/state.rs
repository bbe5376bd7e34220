// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server state management.
//!
//! Wraps the JSONL ledger and the category reference data for shared access
//! across connections.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use sw_core::{jsonl, CategorySet, Result, TransactionRecord, ValidationError};

/// File name of the ledger inside the data directory.
pub const LEDGER_FILE_NAME: &str = "ledger.jsonl";

/// Why a transaction was not recorded.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("storage error: {0}")]
    Storage(#[from] sw_core::Error),
}

/// Shared server state containing the ledger and category lists.
#[derive(Clone)]
pub struct ServerState {
    inner: Arc<ServerStateInner>,
}

struct ServerStateInner {
    /// Ledger path; the mutex serializes appends.
    ledger: Mutex<PathBuf>,
    /// Allowed categories served to clients and enforced on writes.
    categories: CategorySet,
    /// Transactions accepted since startup.
    accepted: AtomicU64,
}

impl ServerState {
    /// Creates a server state whose ledger lives in `data_dir`.
    pub fn new(data_dir: &Path, categories: CategorySet) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        Ok(ServerState {
            inner: Arc::new(ServerStateInner {
                ledger: Mutex::new(data_dir.join(LEDGER_FILE_NAME)),
                categories: categories.normalized(),
                accepted: AtomicU64::new(0),
            }),
        })
    }

    /// Loads a category set from a JSON file with `expenseTypes`/`incomeTypes`.
    pub fn load_categories(path: &Path) -> Result<CategorySet> {
        let content = std::fs::read_to_string(path)?;
        let set: CategorySet = serde_json::from_str(&content)?;
        Ok(set.normalized())
    }

    /// Validates a record and appends it to the ledger.
    ///
    /// The record is durable when this returns `Ok`.
    pub async fn record(&self, record: &TransactionRecord) -> std::result::Result<(), RecordError> {
        record.validate()?;
        self.inner.categories.check(record.kind, &record.category)?;

        let ledger = self.inner.ledger.lock().await;
        jsonl::append(&ledger, record)?;
        self.inner.accepted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// The allowed category lists.
    pub fn categories(&self) -> &CategorySet {
        &self.inner.categories
    }

    /// Every recorded transaction, oldest first.
    pub async fn ledger(&self) -> Result<Vec<TransactionRecord>> {
        let ledger = self.inner.ledger.lock().await;
        jsonl::read_all(&ledger)
    }

    /// Number of transactions accepted since startup.
    pub fn accepted(&self) -> u64 {
        self.inner.accepted.load(Ordering::Relaxed)
    }
}
