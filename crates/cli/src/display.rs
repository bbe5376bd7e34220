// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use sw_core::{CategorySet, TransactionRecord, TransactionType};

use crate::categories::CategoryOrigin;
use crate::sync::{DrainOutcome, DrainReport, SubmitOutcome, SubmitStatus};

/// Width of the category column in record listings.
const CATEGORY_WIDTH: usize = 14;

/// Format an amount with two decimals.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Format a record as a single listing line.
///
/// Output format:
/// ```text
/// 2024-01-10 12:00  expense  food            12.50  lunch
/// ```
pub fn format_record_line(record: &TransactionRecord) -> String {
    let mut line = format!(
        "{}  {:<7}  {:<width$}  {:>10}",
        record.date.format("%Y-%m-%d %H:%M"),
        record.kind.as_str(),
        record.category,
        format_amount(record.amount),
        width = CATEGORY_WIDTH,
    );
    if let Some(note) = record.note.as_deref().filter(|n| !n.is_empty()) {
        line.push_str("  ");
        line.push_str(note);
    }
    line
}

/// Format the outcome of `sw add`.
///
/// Output format:
/// ```text
/// sent: expense food 12.50 (2024-01-10)
/// queued: expense food 12.50 (2024-01-10)
///   reason: network error: connection refused
/// ```
pub fn format_submit_outcome(outcome: &SubmitOutcome) -> Vec<String> {
    let record = &outcome.record;
    let mut lines = vec![format!(
        "{}: {} {} {} ({})",
        outcome.status,
        record.kind,
        record.category,
        format_amount(record.amount),
        record.date.format("%Y-%m-%d"),
    )];
    if let Some(error) = &outcome.error {
        lines.push(format!("  reason: {}", error));
    }
    lines
}

/// JSON shape of `sw add -o json`.
#[derive(Debug, Serialize)]
pub struct SubmitOutcomeJson<'a> {
    pub status: SubmitStatus,
    pub record: &'a TransactionRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> From<&'a SubmitOutcome> for SubmitOutcomeJson<'a> {
    fn from(outcome: &'a SubmitOutcome) -> Self {
        SubmitOutcomeJson {
            status: outcome.status,
            record: &outcome.record,
            error: outcome.error.as_ref().map(|e| e.to_string()),
        }
    }
}

/// Format the result of a drain pass.
pub fn format_drain_report(report: &DrainReport) -> Vec<String> {
    let mut lines = Vec::new();
    match &report.outcome {
        DrainOutcome::Completed if report.sent == 0 => {
            lines.push("nothing to sync".to_string());
        }
        DrainOutcome::Completed => {
            lines.push(format!("synced {} transaction(s)", report.sent));
        }
        DrainOutcome::Halted { error } => {
            lines.push(format!(
                "synced {} transaction(s), stopped at the next one",
                report.sent
            ));
            lines.push(format!("  reason: {}", error));
        }
        DrainOutcome::Interrupted => {
            lines.push(format!(
                "synced {} transaction(s), queue changed by another process",
                report.sent
            ));
        }
        DrainOutcome::AlreadyDraining => {
            lines.push("sync already in progress".to_string());
        }
    }
    if report.remaining > 0 {
        lines.push(format!("{} pending", report.remaining));
    }
    lines
}

/// JSON shape of `sw sync -o json`.
#[derive(Debug, Serialize)]
pub struct DrainReportJson {
    pub outcome: &'static str,
    pub sent: usize,
    pub remaining: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&DrainReport> for DrainReportJson {
    fn from(report: &DrainReport) -> Self {
        let (outcome, error) = match &report.outcome {
            DrainOutcome::Completed => ("completed", None),
            DrainOutcome::Halted { error } => ("halted", Some(error.to_string())),
            DrainOutcome::Interrupted => ("interrupted", None),
            DrainOutcome::AlreadyDraining => ("already_draining", None),
        };
        DrainReportJson {
            outcome,
            sent: report.sent,
            remaining: report.remaining,
            error,
        }
    }
}

/// Format the category lists, optionally for one type.
pub fn format_categories(
    categories: &CategorySet,
    kind: Option<TransactionType>,
    origin: CategoryOrigin,
) -> Vec<String> {
    let kinds = match kind {
        Some(k) => vec![k],
        None => vec![TransactionType::Expense, TransactionType::Income],
    };
    let mut lines: Vec<String> = kinds
        .into_iter()
        .map(|k| format!("{}: {}", k, categories.for_type(k).join(", ")))
        .collect();
    lines.push(format!("(source: {})", origin.as_str()));
    lines
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
