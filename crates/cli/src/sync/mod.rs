// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-tolerant transaction sync.
//!
//! New transactions are sent to `sw-remote` when it is reachable and kept in
//! a durable local queue when it is not. The queue is drained, in order, the
//! next time connectivity returns.
//!
//! # Architecture
//!
//! ```text
//!                    ┌──────────────┐
//!   sw add ─────────►│ Coordinator  │◄──── ConnectivityEvent
//!                    │ (Idle/Drain) │      (ConnectivityMonitor)
//!                    └──────┬───────┘
//!               online      │      offline / failure
//!            ┌──────────────┴──────────────┐
//!            ▼                             ▼
//!   ┌─────────────────┐            ┌─────────────┐
//!   │ RemoteSubmitter │            │    Queue    │
//!   │   (Transport)   │            │ (JSONL+lock)│
//!   └────────┬────────┘            └─────────────┘
//!            ▼
//!       sw-remote
//! ```
//!
//! # Features
//!
//! - Acknowledged writes over WebSocket with request IDs
//! - Durable JSONL queue, fsynced on every change
//! - Strictly ordered drain that halts on the first failure
//! - Single drain at a time; submissions during a drain wait for the next one
//! - Injectable transport, submitter and connectivity for testing

mod connectivity;
mod coordinator;
mod queue;
mod submitter;
mod transport;

pub use connectivity::{
    probe_once, spawn_probe, Connectivity, ConnectivityEvent, ConnectivityMonitor, ProbeTarget,
};
pub use coordinator::{
    DrainOutcome, DrainReport, SubmissionError, SubmitOutcome, SubmitStatus, SyncCoordinator,
    SyncState,
};
pub use queue::{OfflineQueue, QueueError};
pub use submitter::{RemoteSubmitter, SubmitError, SubmitFuture, Submitter, SubmitterConfig};
pub use transport::{Transport, TransportError, WebSocketTransport};

#[cfg(test)]
mod test_helpers;






#[cfg(test)]
mod transport_tests;
