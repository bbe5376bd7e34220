// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! sw-remote: WebSocket ledger server for spendwise.
//!
//! Acknowledges each valid transaction once it is appended to the ledger,
//! rejects invalid ones, and serves the allowed category lists.

mod server;
mod state;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use sw_core::CategorySet;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// sw-remote: spendwise ledger server
#[derive(Parser, Debug)]
#[command(name = "sw-remote")]
#[command(about = "WebSocket ledger server for the spendwise transaction recorder")]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "0.0.0.0:7890")]
    bind: SocketAddr,

    /// Directory for ledger storage
    #[arg(short, long, default_value = ".")]
    data: PathBuf,

    /// JSON file with the allowed categories (expenseTypes, incomeTypes)
    #[arg(long)]
    categories: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting sw-remote server");
    info!("  Bind address: {}", args.bind);
    info!("  Data directory: {}", args.data.display());

    let categories = match &args.categories {
        Some(path) => {
            info!("  Categories: {}", path.display());
            state::ServerState::load_categories(path)?
        }
        None => {
            info!("  Categories: built-in defaults");
            CategorySet::builtin()
        }
    };

    let state = state::ServerState::new(&args.data, categories)?;
    info!("  Ledger entries: {}", state.ledger().await?.len());

    server::run(args.bind, state).await?;

    Ok(())
}
