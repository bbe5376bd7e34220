// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand, ValueEnum};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "sw")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
#[command(about = "Record income and expenses, online or offline")]
#[command(
    long_about = "Record income and expenses, online or offline.\n\n\
    Transactions go straight to the remote ledger when it is reachable and are \
    queued locally when it is not. Queued transactions are sent, in order, on \
    the next 'sw sync' or while 'sw watch' is running."
)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long = "version", action = clap::ArgAction::Version)]
    version: (),

    /// Run as if sw was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize spendwise in the current directory
    #[command(after_help = "\
Examples:
  sw init                               Use the default remote (ws://localhost:7890)
  sw init --remote ws://ledger:7890     Use a specific remote
  sw init --path ~/finances             Initialize another directory")]
    Init {
        /// Directory to initialize (defaults to the current directory)
        #[arg(long)]
        path: Option<String>,

        /// WebSocket URL of the remote ledger
        #[arg(long, value_parser = non_empty_string)]
        remote: Option<String>,
    },

    /// Record a transaction
    #[command(after_help = "\
Examples:
  sw add expense food 12.50                Record an expense dated now
  sw add income salary 2500 --note March   Record income with a note
  sw add expense rent 900 --date 2024-03-01
  sw add expense food 4.20 -o json         Print the outcome as JSON")]
    Add {
        /// Transaction type (expense, income)
        kind: String,

        /// Category (see 'sw categories')
        #[arg(value_parser = non_empty_string)]
        category: String,

        /// Amount, a positive number
        #[arg(allow_hyphen_values = true)]
        amount: f64,

        /// Free-text note
        #[arg(long)]
        note: Option<String>,

        /// Date or timestamp (ISO-8601); defaults to now
        #[arg(long)]
        date: Option<String>,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Send queued transactions to the remote, oldest first
    Sync {
        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Watch connectivity and sync whenever the remote becomes reachable
    Watch,

    /// Show or clear queued transactions
    #[command(after_help = "\
Examples:
  sw queue              List queued transactions
  sw queue -o json      List as JSON
  sw queue clear        Drop every queued transaction")]
    Queue {
        #[command(subcommand)]
        command: Option<QueueCommand>,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show allowed categories
    Categories {
        /// Only show categories for this type (expense, income)
        kind: Option<String>,

        /// Refetch the list from the remote
        #[arg(long)]
        refresh: bool,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show remote, connectivity and queue status
    Status {
        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

/// Queue management commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum QueueCommand {
    /// List queued transactions (default)
    List,
    /// Drop every queued transaction without sending it
    Clear,
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
