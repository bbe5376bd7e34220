// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{Duration, TimeZone, Utc};
use sw_core::{TransactionRecord, TransactionType};
use tokio::sync::{Notify, Semaphore};

use super::submitter::{SubmitError, SubmitFuture, Submitter};

/// Create a test expense whose amount and minute offset are both `n`.
pub fn make_test_record(n: u32) -> TransactionRecord {
    make_test_record_with(TransactionType::Expense, "food", n)
}

/// Create a test record of the given type and category.
pub fn make_test_record_with(kind: TransactionType, category: &str, n: u32) -> TransactionRecord {
    let base = Utc
        .with_ymd_and_hms(2024, 1, 10, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    TransactionRecord::new(
        kind,
        category,
        f64::from(n) + 0.5,
        base + Duration::minutes(i64::from(n)),
    )
    .with_note(format!("test {}", n))
}

/// Scriptable submitter that records every call.
pub struct MockSubmitter {
    calls: Mutex<Vec<TransactionRecord>>,
    rejected: Mutex<Vec<TransactionRecord>>,
    offline: AtomicBool,
    hold: AtomicBool,
    /// Notified each time a held submission starts waiting.
    pub entered: Notify,
    release: Semaphore,
}

impl MockSubmitter {
    /// A submitter that accepts everything.
    pub fn new() -> Self {
        MockSubmitter {
            calls: Mutex::new(Vec::new()),
            rejected: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
            hold: AtomicBool::new(false),
            entered: Notify::new(),
            release: Semaphore::new(0),
        }
    }

    /// Reject this exact record whenever it is submitted.
    pub fn reject(&self, record: &TransactionRecord) {
        self.rejected.lock().unwrap().push(record.clone());
    }

    /// Fail every submission with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Make submissions wait for [`MockSubmitter::release`].
    pub fn hold(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    /// Stop holding and let every waiting submission through.
    pub fn release(&self) {
        self.hold.store(false, Ordering::SeqCst);
        self.release.add_permits(1024);
    }

    /// Records passed to `submit`, in call order.
    pub fn calls(&self) -> Vec<TransactionRecord> {
        self.calls.lock().unwrap().clone()
    }
}

impl Submitter for MockSubmitter {
    fn submit<'a>(&'a self, record: &'a TransactionRecord) -> SubmitFuture<'a, ()> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(record.clone());

            if self.hold.load(Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.acquire().await.unwrap().forget();
            }

            if self.offline.load(Ordering::SeqCst) {
                return Err(SubmitError::Network("mock offline".to_string()));
            }
            if self.rejected.lock().unwrap().contains(record) {
                return Err(SubmitError::Rejected("mock rejection".to_string()));
            }
            Ok(())
        })
    }
}
