// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// `sw` with a clean environment: no inherited data dir or log filter.
pub fn sw() -> Command {
    let mut cmd = cargo_bin_cmd!("sw");
    cmd.env_remove("SPENDWISE_DIR")
        .env_remove("SW_LOG")
        .env_remove("SW_OFFLINE");
    cmd
}

/// `sw` forced offline.
pub fn sw_offline() -> Command {
    let mut cmd = sw();
    cmd.env("SW_OFFLINE", "1");
    cmd
}

/// A URL whose port has nothing listening.
pub fn unreachable_url() -> String {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    format!("ws://127.0.0.1:{}", port)
}

/// Helper to create an initialized temp directory whose remote is unreachable.
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    sw().arg("init")
        .arg("--remote")
        .arg(unreachable_url())
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Queue one expense while offline.
pub fn add_offline(temp: &TempDir, category: &str, amount: &str) {
    sw_offline()
        .args(["add", "expense", category, amount])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("queued:"));
}

/// Parse stdout as JSON.
pub fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}
