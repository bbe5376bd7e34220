// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use crate::config::{init_data_dir, DEFAULT_REMOTE_URL};
use crate::error::Result;

pub fn run(path: Option<String>, remote: Option<String>) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };
    let remote_url = remote.as_deref().unwrap_or(DEFAULT_REMOTE_URL);

    let data_dir = init(&target_path, remote_url)?;

    println!("Initialized spendwise at {}", data_dir.display());
    println!("Remote: {}", remote_url);
    Ok(())
}

pub(crate) fn init(target_path: &Path, remote_url: &str) -> Result<PathBuf> {
    if !target_path.exists() {
        std::fs::create_dir_all(target_path)?;
    }
    init_data_dir(target_path, remote_url)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
