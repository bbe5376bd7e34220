// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `SPENDWISE_DIR` if set and non-empty.
pub fn data_dir() -> Option<PathBuf> {
    std::env::var(vars::SPENDWISE_DIR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Returns `true` if `SW_OFFLINE=1`.
pub fn force_offline() -> bool {
    std::env::var(vars::SW_OFFLINE).is_ok_and(|v| v == "1")
}

/// Returns the value of `SW_LOG` if set.
pub fn log_filter() -> Option<String> {
    std::env::var(vars::SW_LOG).ok()
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
