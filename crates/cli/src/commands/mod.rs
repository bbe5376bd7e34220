// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod add;
pub mod categories;
pub mod init;
pub mod queue;
pub mod status;
pub mod sync;
pub mod watch;

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fs2::FileExt;

use crate::config::{self, find_data_dir, Config, RemoteConfig};
use crate::env;
use crate::error::{Error, Result};
use crate::sync::{
    probe_once, ConnectivityMonitor, OfflineQueue, RemoteSubmitter, SubmitterConfig,
    SyncCoordinator,
};

/// Coordinator wired to the WebSocket submitter.
pub type RemoteCoordinator = SyncCoordinator<RemoteSubmitter, Arc<ConnectivityMonitor>>;

/// Data directory and its configuration.
pub struct Context {
    pub data_dir: PathBuf,
    pub config: Config,
}

impl Context {
    /// Locate and load the data directory for the current process.
    pub fn open() -> Result<Self> {
        let data_dir = find_data_dir()?;
        let config = Config::load(&data_dir)?;
        Ok(Context { data_dir, config })
    }

    pub fn open_queue(&self) -> Result<OfflineQueue> {
        Ok(OfflineQueue::open(&config::queue_path(&self.data_dir))?)
    }

    /// Submitter settings, falling back to defaults without a remote.
    pub fn submitter_config(&self) -> SubmitterConfig {
        self.config
            .remote
            .as_ref()
            .map(RemoteConfig::submitter_config)
            .unwrap_or_default()
    }

    /// Build a coordinator around the given monitor.
    pub fn coordinator(&self, monitor: Arc<ConnectivityMonitor>) -> Result<RemoteCoordinator> {
        let submitter = RemoteSubmitter::new(self.submitter_config());
        Ok(SyncCoordinator::new(submitter, monitor, self.open_queue()?))
    }
}

/// Build the runtime used by async commands.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Io(std::io::Error::other(format!("tokio: {}", e))))
}

/// One-shot connectivity check against the configured remote.
///
/// Always offline when `SW_OFFLINE=1` or no remote is configured.
pub async fn detect_online(remote: Option<&RemoteConfig>) -> bool {
    if env::force_offline() {
        return false;
    }
    let Some(remote) = remote else {
        return false;
    };
    match remote.probe_target() {
        Ok(target) => probe_once(&target, remote.connect_timeout()).await,
        Err(_) => false,
    }
}

/// Take the per-directory drain lock without blocking.
///
/// Only one process may drain or clear the queue at a time.
pub fn acquire_drain_lock(data_dir: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(config::drain_lock_path(data_dir))?;

    file.try_lock_exclusive()
        .map_err(|_| Error::DrainInProgress)?;

    Ok(file)
}

/// Print JSON to stdout.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
