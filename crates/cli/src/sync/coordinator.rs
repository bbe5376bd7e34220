// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync coordinator.
//!
//! Routes each new transaction either straight to the remote or into the
//! offline queue, and drains the queue when connectivity returns. States are
//! `Idle` and `Draining`; at most one drain runs at a time.
//!
//! A drain works on the queue contents as read when it starts (the drain
//! set). Records are submitted one at a time, oldest first, and each is
//! removed from the queue as soon as the remote confirms it. The first
//! failure stops the pass and leaves that record and everything after it
//! queued for the next pass.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use sw_core::{CategorySet, TransactionDraft, TransactionRecord, ValidationError};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::connectivity::{Connectivity, ConnectivityEvent};
use super::queue::{OfflineQueue, QueueError};
use super::submitter::{SubmitError, Submitter};

/// Coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No drain in progress.
    Idle,
    /// A drain pass is running.
    Draining,
}

/// Where a submitted transaction ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    /// Confirmed by the remote.
    Sent,
    /// Persisted locally for a later drain.
    Queued,
}

impl SubmitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitStatus::Sent => "sent",
            SubmitStatus::Queued => "queued",
        }
    }
}

impl std::fmt::Display for SubmitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful `submit_transaction` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub status: SubmitStatus,
    /// The validated record as sent or queued.
    pub record: TransactionRecord,
    /// Why a direct send was abandoned, when the record was queued after one.
    pub error: Option<SubmitError>,
}

/// Errors surfaced by `submit_transaction`.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The record is malformed. Nothing was sent or stored.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The record could not be stored locally and is not queued.
    #[error("failed to save transaction locally: {0}")]
    Persistence(#[from] QueueError),
}

/// How a drain pass ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DrainOutcome {
    /// Every record in the drain set was confirmed.
    Completed,
    /// A submission failed; it and every later record are still queued.
    Halted { error: SubmitError },
    /// The queue head changed under the drain (another process rewrote it).
    Interrupted,
    /// Another drain was already running; nothing was done.
    AlreadyDraining,
}

/// Summary of one drain pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DrainReport {
    pub outcome: DrainOutcome,
    /// Records confirmed and removed during this pass.
    pub sent: usize,
    /// Records left in the queue after the pass.
    pub remaining: usize,
}

/// Coordinates direct submission, queuing and draining.
pub struct SyncCoordinator<S, C> {
    submitter: S,
    connectivity: C,
    queue: Mutex<OfflineQueue>,
    categories: Option<CategorySet>,
    draining: AtomicBool,
}

impl<S: Submitter, C: Connectivity> SyncCoordinator<S, C> {
    /// Create a coordinator that owns the given queue.
    pub fn new(submitter: S, connectivity: C, queue: OfflineQueue) -> Self {
        SyncCoordinator {
            submitter,
            connectivity,
            queue: Mutex::new(queue),
            categories: None,
            draining: AtomicBool::new(false),
        }
    }

    /// Also require categories to be members of `categories`.
    pub fn with_categories(mut self, categories: CategorySet) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Current state.
    pub fn state(&self) -> SyncState {
        if self.draining.load(Ordering::Acquire) {
            SyncState::Draining
        } else {
            SyncState::Idle
        }
    }

    /// The submitter used for remote writes.
    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Snapshot of the queued records, oldest first.
    pub async fn pending(&self) -> Result<Vec<TransactionRecord>, QueueError> {
        self.queue.lock().await.peek_all()
    }

    /// Number of queued records.
    pub async fn pending_count(&self) -> Result<usize, QueueError> {
        self.queue.lock().await.len()
    }

    /// Validate a draft and submit the resulting record.
    pub async fn submit_transaction(
        &self,
        draft: &TransactionDraft,
    ) -> Result<SubmitOutcome, SubmissionError> {
        let record = draft.validate()?;
        self.submit_record(record).await
    }

    /// Submit an already-built record.
    ///
    /// Online: one direct attempt, falling back to the queue on any failure.
    /// Offline, or while a drain is running: straight to the queue, so a new
    /// record never overtakes older queued ones.
    pub async fn submit_record(
        &self,
        record: TransactionRecord,
    ) -> Result<SubmitOutcome, SubmissionError> {
        record.validate()?;
        if let Some(categories) = &self.categories {
            categories.check(record.kind, &record.category)?;
        }

        if !self.connectivity.is_online() {
            debug!("offline, queuing {} {}", record.kind, record.category);
            self.enqueue(&record).await?;
            return Ok(SubmitOutcome {
                status: SubmitStatus::Queued,
                record,
                error: None,
            });
        }

        if self.state() == SyncState::Draining {
            debug!("drain in progress, queuing {} {}", record.kind, record.category);
            self.enqueue(&record).await?;
            return Ok(SubmitOutcome {
                status: SubmitStatus::Queued,
                record,
                error: None,
            });
        }

        match self.submitter.submit(&record).await {
            Ok(()) => {
                info!("sent {} {} {}", record.kind, record.category, record.amount);
                Ok(SubmitOutcome {
                    status: SubmitStatus::Sent,
                    record,
                    error: None,
                })
            }
            Err(e) => {
                warn!("submit failed, saving locally: {}", e);
                self.enqueue(&record).await?;
                Ok(SubmitOutcome {
                    status: SubmitStatus::Queued,
                    record,
                    error: Some(e),
                })
            }
        }
    }

    /// Drain the queue. Called on every offline-to-online transition and on
    /// explicit sync requests.
    ///
    /// Returns `Err` only when the queue itself cannot be read or rewritten.
    pub async fn on_connectivity_restored(&self) -> Result<DrainReport, QueueError> {
        let Some(_guard) = DrainGuard::acquire(&self.draining) else {
            debug!("drain already running, ignoring trigger");
            return Ok(DrainReport {
                outcome: DrainOutcome::AlreadyDraining,
                sent: 0,
                remaining: self.pending_count().await?,
            });
        };

        let drain_set = self.pending().await?;
        if drain_set.is_empty() {
            return Ok(DrainReport {
                outcome: DrainOutcome::Completed,
                sent: 0,
                remaining: 0,
            });
        }
        info!("draining {} queued transaction(s)", drain_set.len());

        let mut sent = 0;
        let mut outcome = DrainOutcome::Completed;
        for record in &drain_set {
            if let Err(e) = self.submitter.submit(record).await {
                warn!("drain halted after {} sent: {}", sent, e);
                outcome = DrainOutcome::Halted { error: e };
                break;
            }
            if !self.queue.lock().await.remove_front_if(record)? {
                error!("queue head changed during drain, stopping pass");
                sent += 1;
                outcome = DrainOutcome::Interrupted;
                break;
            }
            sent += 1;
        }

        let remaining = self.pending_count().await?;
        if outcome == DrainOutcome::Completed {
            info!("drain complete: {} sent, {} remaining", sent, remaining);
        }
        Ok(DrainReport {
            outcome,
            sent,
            remaining,
        })
    }

    /// React to connectivity events until `cancel` fires or the channel
    /// closes.
    pub async fn run(
        &self,
        mut events: broadcast::Receiver<ConnectivityEvent>,
        cancel: CancellationToken,
    ) {
        loop {
            let event = tokio::select! {
                _ = cancel.cancelled() => break,
                event = events.recv() => event,
            };

            match event {
                Ok(ConnectivityEvent::Online) => self.drain_logged().await,
                Ok(ConnectivityEvent::Offline) => debug!("offline, drains paused"),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("missed {} connectivity events", skipped);
                    if self.connectivity.is_online() {
                        self.drain_logged().await;
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    async fn drain_logged(&self) {
        if let Err(e) = self.on_connectivity_restored().await {
            error!("drain failed: {}", e);
        }
    }

    async fn enqueue(&self, record: &TransactionRecord) -> Result<(), QueueError> {
        let mut queue = self.queue.lock().await;
        queue.enqueue(record)?;
        info!("queued {} {} {}", record.kind, record.category, record.amount);
        Ok(())
    }
}

/// Holds the `Draining` flag until dropped.
struct DrainGuard<'a>(&'a AtomicBool);

impl<'a> DrainGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| DrainGuard(flag))
    }
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
