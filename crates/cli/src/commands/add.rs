// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use chrono::Utc;
use sw_core::TransactionDraft;
use tracing::debug;

use super::{detect_online, print_json, runtime, Context};
use crate::categories::CategoryCache;
use crate::cli::OutputFormat;
use crate::config;
use crate::display::{format_submit_outcome, SubmitOutcomeJson};
use crate::error::Result;
use crate::sync::{ConnectivityMonitor, SubmitOutcome};

pub fn run(
    kind: String,
    category: String,
    amount: f64,
    note: Option<String>,
    date: Option<String>,
    output: OutputFormat,
) -> Result<()> {
    let ctx = Context::open()?;
    let draft = TransactionDraft {
        kind: Some(kind),
        category: Some(category),
        amount: Some(amount),
        date: Some(date.unwrap_or_else(|| Utc::now().to_rfc3339())),
        note,
    };

    let outcome = runtime()?.block_on(async {
        let online = detect_online(ctx.config.remote.as_ref()).await;
        submit(&ctx, &draft, online).await
    })?;

    match output {
        OutputFormat::Text => {
            for line in format_submit_outcome(&outcome) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => print_json(&SubmitOutcomeJson::from(&outcome))?,
    }
    Ok(())
}

/// Validate and submit one draft, sending it or queuing it.
pub(crate) async fn submit(
    ctx: &Context,
    draft: &TransactionDraft,
    online: bool,
) -> Result<SubmitOutcome> {
    let monitor = Arc::new(ConnectivityMonitor::new(online));
    let mut coordinator = ctx.coordinator(monitor)?;

    let cache = CategoryCache::new(&config::categories_path(&ctx.data_dir));
    let source = online.then_some(coordinator.submitter());
    let (categories, origin) = cache.resolve(source, false).await?;
    if origin.is_authoritative() {
        coordinator = coordinator.with_categories(categories);
    } else {
        debug!("no category list from the remote yet, skipping membership check");
    }

    let outcome = coordinator.submit_transaction(draft).await?;
    coordinator.submitter().disconnect().await;
    Ok(outcome)
}

#[cfg(test)]
#[path = "add_tests.rs"]
mod tests;
