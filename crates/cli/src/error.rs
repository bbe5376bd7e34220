// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::{QueueError, SubmissionError, SubmitError};

/// All possible errors that can occur in the swrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'sw init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("{reason}\n  hint: use a URL like ws://localhost:7890")]
    InvalidRemoteUrl { url: String, reason: String },

    #[error("no remote configured\n  hint: add a [remote] section with a url to .spendwise/config.toml")]
    NoRemote,

    #[error("another process is already syncing\n  hint: wait for it to finish or stop 'sw watch'")]
    DrainInProgress,

    #[error("{0}")]
    Validation(#[from] sw_core::ValidationError),

    #[error("queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("remote error: {0}")]
    Submit(#[from] SubmitError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// A specialized Result type for swrs operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<SubmissionError> for Error {
    fn from(e: SubmissionError) -> Self {
        match e {
            SubmissionError::Validation(e) => Error::Validation(e),
            SubmissionError::Persistence(e) => Error::Queue(e),
        }
    }
}

impl From<sw_core::Error> for Error {
    fn from(e: sw_core::Error) -> Self {
        match e {
            sw_core::Error::Validation(e) => Error::Validation(e),
            sw_core::Error::Io(e) => Error::Io(e),
            sw_core::Error::Json(e) => Error::Json(e),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
