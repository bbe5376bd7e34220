// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::TempDir;
use yare::parameterized;

#[test]
fn test_init_and_load_config() {
    let temp = TempDir::new().unwrap();
    let data_dir = init_data_dir(temp.path(), "ws://example.com:7890").unwrap();

    assert_eq!(data_dir, temp.path().join(".spendwise"));
    let config = Config::load(&data_dir).unwrap();
    assert_eq!(config.remote_url(), Some("ws://example.com:7890"));

    let remote = config.require_remote().unwrap();
    assert_eq!(remote.submit_timeout_ms, 5_000);
    assert_eq!(remote.connect_timeout_ms, 2_000);
    assert_eq!(remote.probe_interval_ms, 5_000);
}

#[test]
fn test_init_writes_gitignore() {
    let temp = TempDir::new().unwrap();
    let data_dir = init_data_dir(temp.path(), DEFAULT_REMOTE_URL).unwrap();

    let gitignore = std::fs::read_to_string(data_dir.join(".gitignore")).unwrap();
    assert!(gitignore.contains("pending.jsonl"));
    assert!(gitignore.contains("categories.json"));
}

#[test]
fn test_init_twice_fails() {
    let temp = TempDir::new().unwrap();
    init_data_dir(temp.path(), DEFAULT_REMOTE_URL).unwrap();

    let err = init_data_dir(temp.path(), DEFAULT_REMOTE_URL).unwrap_err();
    assert!(matches!(err, Error::AlreadyInitialized(_)));
}

#[test]
fn test_init_invalid_url_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let err = init_data_dir(temp.path(), "http://example.com").unwrap_err();
    assert!(matches!(err, Error::InvalidRemoteUrl { .. }));
    assert!(!temp.path().join(".spendwise").exists());
}

#[parameterized(
    ws = { "ws://localhost:7890", true },
    wss = { "wss://sync.example.com/ledger", true },
    http = { "http://localhost:7890", false },
    bare = { "localhost:7890", false },
    no_host = { "ws://", false },
)]
fn test_validate_url(url: &str, valid: bool) {
    assert_eq!(RemoteConfig::new(url).validate_url().is_none(), valid);
}

#[test]
fn test_partial_remote_section_uses_defaults() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        "[remote]\nurl = \"ws://host:1\"\nsubmit_timeout_ms = 250\n",
    )
    .unwrap();

    let config = Config::load(temp.path()).unwrap();
    let remote = config.require_remote().unwrap();
    assert_eq!(remote.submit_timeout_ms, 250);
    assert_eq!(remote.connect_timeout_ms, 2_000);

    let submitter = remote.submitter_config();
    assert_eq!(submitter.url, "ws://host:1");
    assert_eq!(submitter.submit_timeout, Duration::from_millis(250));
}

#[test]
fn test_config_without_remote() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "").unwrap();

    let config = Config::load(temp.path()).unwrap();
    assert!(config.remote_url().is_none());
    assert!(matches!(config.require_remote(), Err(Error::NoRemote)));
}

#[test]
fn test_load_malformed_config() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "remote = 3").unwrap();

    let err = Config::load(temp.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_save_roundtrip() {
    let temp = TempDir::new().unwrap();
    let config = Config::new("wss://example.com").unwrap();
    config.save(temp.path()).unwrap();

    let loaded = Config::load(temp.path()).unwrap();
    assert_eq!(loaded.remote_url(), Some("wss://example.com"));
}

#[test]
fn test_probe_target_uses_default_port() {
    let remote = RemoteConfig::new("wss://example.com");
    let target = remote.probe_target().unwrap();
    assert_eq!(target.addr(), "example.com:443");
}

#[test]
fn test_data_paths() {
    let dir = Path::new("/project/.spendwise");
    assert_eq!(queue_path(dir), dir.join("pending.jsonl"));
    assert_eq!(categories_path(dir), dir.join("categories.json"));
    assert_eq!(drain_lock_path(dir), dir.join("drain.lock"));
}
