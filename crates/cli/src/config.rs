// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.spendwise/config.toml`. The same directory
//! holds the offline queue (`pending.jsonl`), the category cache
//! (`categories.json`) and the drain lock.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};
use crate::sync::{ProbeTarget, SubmitterConfig};

const DATA_DIR_NAME: &str = ".spendwise";
const CONFIG_FILE_NAME: &str = "config.toml";
const QUEUE_FILE_NAME: &str = "pending.jsonl";
const CATEGORIES_FILE_NAME: &str = "categories.json";
const DRAIN_LOCK_FILE_NAME: &str = "drain.lock";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Default remote used by `sw init` without `--remote`.
pub const DEFAULT_REMOTE_URL: &str = "ws://localhost:7890";

/// Project configuration stored in `.spendwise/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote server (if absent, every transaction stays queued).
    pub remote: Option<RemoteConfig>,
}

/// Remote server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// WebSocket URL of `sw-remote` (`ws://` or `wss://`).
    pub url: String,
    /// Max time to wait for the server to answer one write (default: 5000).
    #[serde(default = "default_submit_timeout_ms")]
    pub submit_timeout_ms: u64,
    /// Max time to establish a connection (default: 2000).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Interval between reachability probes in `sw watch` (default: 5000).
    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,
}

fn default_submit_timeout_ms() -> u64 {
    5_000
}

fn default_connect_timeout_ms() -> u64 {
    2_000
}

fn default_probe_interval_ms() -> u64 {
    5_000
}

impl RemoteConfig {
    /// Creates a remote config with default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        RemoteConfig {
            url: url.into(),
            submit_timeout_ms: default_submit_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            probe_interval_ms: default_probe_interval_ms(),
        }
    }

    /// Validates that the URL is a WebSocket URL with a host.
    ///
    /// Returns an error message if the URL is invalid.
    pub fn validate_url(&self) -> Option<String> {
        if !(self.url.starts_with("ws://") || self.url.starts_with("wss://")) {
            return Some(format!(
                "invalid remote URL '{}': must start with ws:// or wss://",
                self.url
            ));
        }
        if ProbeTarget::from_url(&self.url).is_none() {
            return Some(format!("invalid remote URL '{}': missing host", self.url));
        }
        None
    }

    /// Host and port used for reachability probes.
    pub fn probe_target(&self) -> Result<ProbeTarget> {
        ProbeTarget::from_url(&self.url).ok_or_else(|| Error::InvalidRemoteUrl {
            url: self.url.clone(),
            reason: "missing host".to_string(),
        })
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms)
    }

    /// Submitter settings derived from this config.
    pub fn submitter_config(&self) -> SubmitterConfig {
        SubmitterConfig {
            url: self.url.clone(),
            connect_timeout: self.connect_timeout(),
            submit_timeout: Duration::from_millis(self.submit_timeout_ms),
        }
    }
}

impl Config {
    /// Creates a config pointing at the given remote.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRemoteUrl`] if the URL is not a WebSocket URL.
    pub fn new(remote_url: &str) -> Result<Self> {
        let remote = RemoteConfig::new(remote_url);
        if let Some(reason) = remote.validate_url() {
            return Err(Error::InvalidRemoteUrl {
                url: remote_url.to_string(),
                reason,
            });
        }
        Ok(Config {
            remote: Some(remote),
        })
    }

    /// Loads configuration from the given `.spendwise/` directory.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Returns the remote URL if configured.
    pub fn remote_url(&self) -> Option<&str> {
        self.remote.as_ref().map(|r| r.url.as_str())
    }

    /// Returns the remote config or [`Error::NoRemote`].
    pub fn require_remote(&self) -> Result<&RemoteConfig> {
        self.remote.as_ref().ok_or(Error::NoRemote)
    }

    /// Saves configuration to the given `.spendwise/` directory.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let config_path = data_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Find the `.spendwise` directory.
///
/// `SPENDWISE_DIR` wins when set; otherwise walks up from the current
/// directory.
pub fn find_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::data_dir() {
        if dir.join(CONFIG_FILE_NAME).is_file() {
            return Ok(dir);
        }
        return Err(Error::NotInitialized);
    }

    let mut current = std::env::current_dir()?;
    loop {
        let data_dir = current.join(DATA_DIR_NAME);
        if data_dir.is_dir() {
            return Ok(data_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Path of the offline queue file.
pub fn queue_path(data_dir: &Path) -> PathBuf {
    data_dir.join(QUEUE_FILE_NAME)
}

/// Path of the category cache.
pub fn categories_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CATEGORIES_FILE_NAME)
}

/// Path of the lock held while a process drains the queue.
pub fn drain_lock_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DRAIN_LOCK_FILE_NAME)
}

/// Initialize a new `.spendwise` directory at the given path.
pub fn init_data_dir(path: &Path, remote_url: &str) -> Result<PathBuf> {
    let data_dir = path.join(DATA_DIR_NAME);

    if data_dir.exists() {
        return Err(Error::AlreadyInitialized(data_dir.display().to_string()));
    }

    // Validate before touching the filesystem.
    let config = Config::new(remote_url)?;

    fs::create_dir_all(&data_dir)?;
    config.save(&data_dir)?;
    write_gitignore(&data_dir)?;

    Ok(data_dir)
}

/// Write a .gitignore covering the queue, cache and lock files.
pub fn write_gitignore(data_dir: &Path) -> Result<()> {
    let content = "# Pending transactions (local only)\npending.jsonl\npending.jsonl.lock\npending.jsonl.tmp\n\n# Runtime state\ncategories.json\ndrain.lock\n";
    fs::write(data_dir.join(GITIGNORE_FILE_NAME), content)?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
