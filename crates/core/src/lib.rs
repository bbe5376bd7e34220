// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! sw-core: Shared library for the spendwise transaction recorder
//!
//! This crate provides the transaction data model, its validation rules, the
//! category reference data, JSONL persistence helpers and the wire protocol
//! used by both the `sw` client and the `sw-remote` server.

pub mod category;
pub mod error;
pub mod jsonl;
pub mod protocol;
pub mod transaction;

pub use category::{normalize_category, CategorySet};
pub use error::{Error, Result, ValidationError};
pub use transaction::{parse_date, TransactionDraft, TransactionRecord, TransactionType};
