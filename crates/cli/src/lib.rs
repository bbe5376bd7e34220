// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! swrs - an offline-tolerant transaction recorder library.
//!
//! This crate provides the functionality behind the `sw` CLI: transactions
//! are sent to a remote ledger (`sw-remote`) when it is reachable and stored
//! in a local queue when it is not, then replayed in order once connectivity
//! returns.
//!
//! # Main Components
//!
//! - [`sync`] - Offline queue, remote submitter, connectivity monitor and the
//!   [`SyncCoordinator`](sync::SyncCoordinator) that ties them together
//! - [`Config`] - Data directory configuration (remote URL and timeouts)
//! - [`categories`] - Cached category reference data
//! - [`Error`] - Error types for all operations
//!
//! # Initialization
//!
//! Use [`init_data_dir`] to create a new `.spendwise/` directory:
//!
//! ```rust,ignore
//! use swrs::{init_data_dir, find_data_dir, Config};
//!
//! let data_dir = init_data_dir(Path::new("."), "ws://localhost:7890")?;
//!
//! // Later, find it again
//! let data_dir = find_data_dir()?;
//! let config = Config::load(&data_dir)?;
//! ```

mod cli;
mod commands;
mod display;
mod env;

pub mod categories;
pub mod config;
pub mod error;
pub mod sync;

pub use cli::{Cli, Command, OutputFormat, QueueCommand};
pub use config::{find_data_dir, init_data_dir, Config};
pub use error::{Error, Result};

/// Returns the log filter for the `sw` binary (`SW_LOG`, default `warn`).
pub fn log_filter() -> String {
    env::log_filter()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Init { path, remote } => commands::init::run(path, remote),
        Command::Add {
            kind,
            category,
            amount,
            note,
            date,
            output,
        } => commands::add::run(kind, category, amount, note, date, output),
        Command::Sync { output } => commands::sync::run(output),
        Command::Watch => commands::watch::run(),
        Command::Queue { command, output } => match command {
            None | Some(QueueCommand::List) => commands::queue::list(output),
            Some(QueueCommand::Clear) => commands::queue::clear(),
        },
        Command::Categories {
            kind,
            refresh,
            output,
        } => commands::categories::run(kind, refresh, output),
        Command::Status { output } => commands::status::run(output),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
