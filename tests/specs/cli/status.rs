// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `aqua status` specs.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const UNREACHABLE: &str = "http://127.0.0.1:1";

fn aqua() -> Command {
    let mut cmd = cargo_bin_cmd!("aqua");
    cmd.env_remove("AQUA_CONFIG").env_remove("AQUA_TOKEN");
    cmd
}

fn temp_with_config(toml: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("aqua.toml"), toml).unwrap();
    temp
}

fn unreachable_config() -> TempDir {
    temp_with_config(&format!(
        "[backend]\nurl = \"{UNREACHABLE}\"\ntimeout_secs = 1\n\n[heartbeat]\ntimeout_ms = 500\n"
    ))
}

#[test]
fn status_reports_unreachable_backend_as_offline() {
    let temp = unreachable_config();
    aqua()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Backend: {UNREACHABLE}")))
        .stdout(predicate::str::contains("Status: offline"))
        .stdout(predicate::str::contains("Store: .aqua"));
}

#[test]
fn status_json_output() {
    let temp = unreachable_config();
    let output = aqua()
        .args(["status", "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["backend"], UNREACHABLE);
    assert_eq!(value["online"], false);
}

#[test]
fn status_config_flag_overrides_env() {
    let temp = unreachable_config();
    let other = temp_with_config("[backend]\nurl = \"http://elsewhere.invalid\"\n");

    aqua()
        .args(["status", "--config"])
        .arg(temp.path().join("aqua.toml"))
        .env("AQUA_CONFIG", other.path().join("aqua.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains(UNREACHABLE));
}

#[test]
fn status_reads_config_from_env() {
    let temp = unreachable_config();
    let elsewhere = TempDir::new().unwrap();

    aqua()
        .arg("status")
        .env("AQUA_CONFIG", temp.path().join("aqua.toml"))
        .current_dir(elsewhere.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(UNREACHABLE));
}

#[test]
fn status_rejects_malformed_config() {
    let temp = temp_with_config("[backend\n");
    aqua()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: config error: failed to parse config"));
}

#[test]
fn status_rejects_invalid_backend_url() {
    let temp = temp_with_config("[backend]\nurl = \"not a url\"\n");
    aqua()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid backend url 'not a url'"));
}
