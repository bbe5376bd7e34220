// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Long-running connectivity watch.
//!
//! Probes the remote periodically and drains the queue on every
//! offline-to-online edge until interrupted.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::{acquire_drain_lock, runtime, Context};
use crate::config::RemoteConfig;
use crate::env;
use crate::error::Result;
use crate::sync::{spawn_probe, ConnectivityMonitor};

pub fn run() -> Result<()> {
    let ctx = Context::open()?;
    let remote = ctx.config.require_remote()?.clone();
    let _lock = acquire_drain_lock(&ctx.data_dir)?;

    runtime()?.block_on(async {
        let cancel = CancellationToken::new();
        let on_signal = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupted, stopping watch");
            }
            on_signal.cancel();
        });

        println!("watching {} (Ctrl-C to stop)", remote.url);
        let pending = watch(&ctx, &remote, cancel).await?;
        println!("stopped, {} pending", pending);
        Ok(())
    })
}

/// Run the probe and coordinator until `cancel` fires.
///
/// Returns the number of records still queued.
pub(crate) async fn watch(
    ctx: &Context,
    remote: &RemoteConfig,
    cancel: CancellationToken,
) -> Result<usize> {
    let monitor = Arc::new(ConnectivityMonitor::new(false));
    let events = monitor.subscribe();
    let coordinator = ctx.coordinator(Arc::clone(&monitor))?;

    let probe = if env::force_offline() {
        warn!("SW_OFFLINE=1, not probing the remote");
        None
    } else {
        Some(spawn_probe(
            Arc::clone(&monitor),
            remote.probe_target()?,
            remote.probe_interval(),
            remote.connect_timeout(),
            cancel.clone(),
        ))
    };

    coordinator.run(events, cancel).await;

    if let Some(probe) = probe {
        if let Err(e) = probe.await {
            warn!("probe task failed: {}", e);
        }
    }
    coordinator.submitter().disconnect().await;
    Ok(coordinator.pending_count().await?)
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
