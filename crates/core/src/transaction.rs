// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transaction records and their validation.
//!
//! A [`TransactionDraft`] is what a caller hands in: every field optional and
//! loosely typed, as it arrives from a form or a JSON payload. Validation turns
//! it into a [`TransactionRecord`], the only shape that may be queued or sent.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::category::normalize_category;
use crate::error::ValidationError;

/// Direction of money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money spent.
    Expense,
    /// Money received.
    Income,
}

impl TransactionType {
    /// Returns the string representation used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            _ => Err(ValidationError::InvalidType(s.to_string())),
        }
    }
}

/// A well-formed financial entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TransactionRecord {
    /// Creates a record with a normalized category and no note.
    pub fn new(
        kind: TransactionType,
        category: impl AsRef<str>,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Self {
        TransactionRecord {
            kind,
            category: normalize_category(category.as_ref()),
            amount,
            date,
            note: None,
        }
    }

    /// Attaches a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Re-checks the invariants a typed record can still violate.
    ///
    /// Records can be built field by field or read back from disk, so the
    /// category and amount are checked again before they are queued or sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        check_amount(self.amount)
    }
}

/// Unvalidated transaction input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl TransactionDraft {
    /// Checks required fields, then amount, type and date, in that order.
    pub fn validate(&self) -> Result<TransactionRecord, ValidationError> {
        let kind = required("type", self.kind.as_deref())?;
        let category = required("category", self.category.as_deref())?;
        let amount = self.amount.ok_or(ValidationError::MissingField("amount"))?;
        let date = required("date", self.date.as_deref())?;

        check_amount(amount)?;
        let kind = kind.parse::<TransactionType>()?;
        let date = parse_date(date)?;

        Ok(TransactionRecord {
            kind,
            category: normalize_category(category),
            amount,
            date,
            note: self.note.clone(),
        })
    }
}

impl From<TransactionRecord> for TransactionDraft {
    fn from(record: TransactionRecord) -> Self {
        TransactionDraft {
            kind: Some(record.kind.as_str().to_string()),
            category: Some(record.category),
            amount: Some(record.amount),
            date: Some(record.date.to_rfc3339()),
            note: record.note,
        }
    }
}

/// Parses an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with any offset, a naive date-time (taken as UTC) and a
/// bare calendar date (midnight UTC).
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(ValidationError::InvalidDate(s.to_string()))
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn check_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount(amount))
    }
}

#[cfg(test)]
#[path = "transaction_tests.rs"]
mod tests;
