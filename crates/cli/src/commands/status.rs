// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;

use super::{detect_online, print_json, runtime, Context};
use crate::categories::CategoryCache;
use crate::cli::OutputFormat;
use crate::config;
use crate::env;
use crate::error::Result;

/// Connectivity as seen by a one-shot probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Connectivity {
    Online,
    Offline,
    /// `SW_OFFLINE=1` is set.
    Forced,
}

impl Connectivity {
    fn as_str(&self) -> &'static str {
        match self {
            Connectivity::Online => "online",
            Connectivity::Offline => "offline",
            Connectivity::Forced => "offline (SW_OFFLINE=1)",
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Status {
    pub data_dir: String,
    pub remote: Option<String>,
    pub connectivity: Connectivity,
    pub pending: usize,
    pub categories_cached: bool,
}

pub fn run(output: OutputFormat) -> Result<()> {
    let ctx = Context::open()?;
    let status = runtime()?.block_on(collect(&ctx))?;

    match output {
        OutputFormat::Text => {
            for line in format_status(&status) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => print_json(&status)?,
    }
    Ok(())
}

pub(crate) async fn collect(ctx: &Context) -> Result<Status> {
    let connectivity = if env::force_offline() {
        Connectivity::Forced
    } else if detect_online(ctx.config.remote.as_ref()).await {
        Connectivity::Online
    } else {
        Connectivity::Offline
    };

    Ok(Status {
        data_dir: ctx.data_dir.display().to_string(),
        remote: ctx.config.remote_url().map(str::to_string),
        connectivity,
        pending: ctx.open_queue()?.len()?,
        categories_cached: CategoryCache::new(&config::categories_path(&ctx.data_dir))
            .load()
            .is_some(),
    })
}

pub(crate) fn format_status(status: &Status) -> Vec<String> {
    vec![
        format!("Data: {}", status.data_dir),
        format!("Remote: {}", status.remote.as_deref().unwrap_or("(none)")),
        format!("Connectivity: {}", status.connectivity.as_str()),
        format!("Pending: {}", status.pending),
        format!(
            "Categories: {}",
            if status.categories_cached {
                "cached"
            } else {
                "not cached"
            }
        ),
    ]
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
