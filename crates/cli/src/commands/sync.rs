// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit sync trigger: one drain pass over the offline queue.

use std::sync::Arc;

use super::{acquire_drain_lock, print_json, runtime, Context};
use crate::cli::OutputFormat;
use crate::display::{format_drain_report, DrainReportJson};
use crate::env;
use crate::error::Result;
use crate::sync::{ConnectivityMonitor, DrainReport};

pub fn run(output: OutputFormat) -> Result<()> {
    let ctx = Context::open()?;
    ctx.config.require_remote()?;
    let _lock = acquire_drain_lock(&ctx.data_dir)?;

    if env::force_offline() {
        let pending = ctx.open_queue()?.len()?;
        match output {
            OutputFormat::Text => println!("offline (SW_OFFLINE=1): {} pending", pending),
            OutputFormat::Json => print_json(&serde_json::json!({
                "outcome": "offline",
                "sent": 0,
                "remaining": pending,
            }))?,
        }
        return Ok(());
    }

    let report = runtime()?.block_on(drain(&ctx))?;
    match output {
        OutputFormat::Text => {
            for line in format_drain_report(&report) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => print_json(&DrainReportJson::from(&report))?,
    }
    Ok(())
}

/// Run one drain pass against the configured remote.
///
/// No reachability probe is made first; an unreachable remote halts the pass
/// at the first record.
pub(crate) async fn drain(ctx: &Context) -> Result<DrainReport> {
    let monitor = Arc::new(ConnectivityMonitor::new(true));
    let coordinator = ctx.coordinator(monitor)?;
    let report = coordinator.on_connectivity_restored().await?;
    coordinator.submitter().disconnect().await;
    Ok(report)
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
