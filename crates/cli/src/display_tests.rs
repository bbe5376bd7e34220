// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::sync::SubmitError;
use chrono::{TimeZone, Utc};
use yare::parameterized;

fn record() -> TransactionRecord {
    TransactionRecord::new(
        TransactionType::Expense,
        "food",
        12.5,
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
    )
}

#[parameterized(
    whole = { 3.0, "3.00" },
    half = { 12.5, "12.50" },
    large = { 1234.567, "1234.57" },
)]
fn test_format_amount(amount: f64, expected: &str) {
    assert_eq!(format_amount(amount), expected);
}

#[test]
fn test_format_record_line() {
    let line = format_record_line(&record());
    assert!(line.starts_with("2024-01-10 12:00  expense  food"));
    assert!(line.ends_with("12.50"));

    let line = format_record_line(&record().with_note("lunch"));
    assert!(line.ends_with("12.50  lunch"));
}

#[test]
fn test_format_record_line_skips_empty_note() {
    let line = format_record_line(&record().with_note(""));
    assert!(line.ends_with("12.50"));
}

#[test]
fn test_format_submit_outcome_sent() {
    let outcome = SubmitOutcome {
        status: SubmitStatus::Sent,
        record: record(),
        error: None,
    };
    assert_eq!(
        format_submit_outcome(&outcome),
        vec!["sent: expense food 12.50 (2024-01-10)"]
    );
}

#[test]
fn test_format_submit_outcome_queued_with_reason() {
    let outcome = SubmitOutcome {
        status: SubmitStatus::Queued,
        record: record(),
        error: Some(SubmitError::Network("connection refused".to_string())),
    };
    let lines = format_submit_outcome(&outcome);
    assert_eq!(lines[0], "queued: expense food 12.50 (2024-01-10)");
    assert_eq!(lines[1], "  reason: network error: connection refused");
}

#[test]
fn test_submit_outcome_json() {
    let outcome = SubmitOutcome {
        status: SubmitStatus::Queued,
        record: record(),
        error: None,
    };
    let json = serde_json::to_value(SubmitOutcomeJson::from(&outcome)).unwrap();
    assert_eq!(json["status"], "queued");
    assert_eq!(json["record"]["category"], "food");
    assert!(json.get("error").is_none());
}

#[test]
fn test_format_drain_report() {
    let report = DrainReport {
        outcome: DrainOutcome::Completed,
        sent: 0,
        remaining: 0,
    };
    assert_eq!(format_drain_report(&report), vec!["nothing to sync"]);

    let report = DrainReport {
        outcome: DrainOutcome::Halted {
            error: SubmitError::Rejected("bad".to_string()),
        },
        sent: 1,
        remaining: 2,
    };
    let lines = format_drain_report(&report);
    assert_eq!(lines[0], "synced 1 transaction(s), stopped at the next one");
    assert_eq!(lines[1], "  reason: rejected by remote: bad");
    assert_eq!(lines[2], "2 pending");
}

#[test]
fn test_drain_report_json() {
    let report = DrainReport {
        outcome: DrainOutcome::Halted {
            error: SubmitError::Rejected("bad".to_string()),
        },
        sent: 1,
        remaining: 2,
    };
    let json = serde_json::to_value(DrainReportJson::from(&report)).unwrap();
    assert_eq!(json["outcome"], "halted");
    assert_eq!(json["sent"], 1);
    assert_eq!(json["remaining"], 2);
    assert_eq!(json["error"], "rejected by remote: bad");
}

#[test]
fn test_format_categories() {
    let set = CategorySet::new(["food", "rent"], ["salary"]);
    let lines = format_categories(&set, None, CategoryOrigin::Cache);
    assert_eq!(
        lines,
        vec!["expense: food, rent", "income: salary", "(source: cache)"]
    );

    let lines = format_categories(&set, Some(TransactionType::Income), CategoryOrigin::Remote);
    assert_eq!(lines, vec!["income: salary", "(source: remote)"]);
}
