// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for sw-core operations.

use thiserror::Error;

/// Reasons a transaction is rejected before it reaches the queue or the remote.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid transaction type: '{0}'\n  hint: valid types are: expense, income")]
    InvalidType(String),

    #[error("invalid amount: {0}\n  hint: amount must be a positive number")]
    InvalidAmount(f64),

    #[error("invalid date: '{0}'\n  hint: use an ISO-8601 timestamp such as 2024-01-10T12:00:00Z")]
    InvalidDate(String),

    #[error("unknown {kind} category: '{category}'\n  hint: valid categories are: {allowed}")]
    UnknownCategory {
        kind: String,
        category: String,
        allowed: String,
    },
}

/// All possible errors that can occur in sw-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for sw-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
