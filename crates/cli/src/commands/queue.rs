// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use sw_core::TransactionRecord;

use super::{acquire_drain_lock, print_json, Context};
use crate::cli::OutputFormat;
use crate::display::format_record_line;
use crate::error::Result;

pub fn list(output: OutputFormat) -> Result<()> {
    let ctx = Context::open()?;
    let records = pending(&ctx)?;

    match output {
        OutputFormat::Text => {
            if records.is_empty() {
                println!("no pending transactions");
            }
            for record in &records {
                println!("{}", format_record_line(record));
            }
        }
        OutputFormat::Json => print_json(&records)?,
    }
    Ok(())
}

pub fn clear() -> Result<()> {
    let ctx = Context::open()?;
    let cleared = clear_pending(&ctx)?;
    println!("cleared {} pending transaction(s)", cleared);
    Ok(())
}

pub(crate) fn pending(ctx: &Context) -> Result<Vec<TransactionRecord>> {
    Ok(ctx.open_queue()?.peek_all()?)
}

/// Drop every queued record. Refuses while another process is draining.
pub(crate) fn clear_pending(ctx: &Context) -> Result<usize> {
    let _lock = acquire_drain_lock(&ctx.data_dir)?;
    let mut queue = ctx.open_queue()?;
    let count = queue.len()?;
    queue.clear()?;
    Ok(count)
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
