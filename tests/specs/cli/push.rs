// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `aqua push` specs against an unreachable backend.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const WRITES: &str = r#"{"entity": "clientes", "action": "create", "body": {"nombre": "Ana"}}
{"entity": "pedidos", "action": "delete", "id": 7}
"#;

fn setup() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("aqua.toml"),
        "[backend]\nurl = \"http://127.0.0.1:1\"\ntimeout_secs = 1\n\n[heartbeat]\ninterval_ms = 200\ntimeout_ms = 200\n",
    )
    .unwrap();
    std::fs::write(temp.path().join("writes.jsonl"), WRITES).unwrap();
    temp
}

fn aqua(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("aqua");
    cmd.env_remove("AQUA_CONFIG").current_dir(temp.path());
    cmd
}

#[test]
fn push_offline_reports_queued_operations() {
    let temp = setup();
    aqua(&temp)
        .args(["push", "writes.jsonl"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Pushed 2 request(s): 0 sent, 2 queued"))
        .stderr(predicate::str::contains("error: 2 operation(s) still queued"));
}

#[test]
fn push_wait_gives_up_when_backend_stays_down() {
    let temp = setup();
    aqua(&temp)
        .args(["push", "writes.jsonl", "--wait", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 operation(s) still queued"));
}

#[test]
fn push_reads_stdin() {
    let temp = setup();
    aqua(&temp)
        .args(["push", "-"])
        .write_stdin(WRITES)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Pushed 2 request(s)"));
}

#[test]
fn push_empty_input_succeeds() {
    let temp = setup();
    std::fs::write(temp.path().join("empty.jsonl"), "\n\n").unwrap();
    aqua(&temp)
        .args(["push", "empty.jsonl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pushed 0 request(s): 0 sent, 0 queued"));
}

#[test]
fn push_rejects_malformed_line_before_sending() {
    let temp = setup();
    std::fs::write(
        temp.path().join("bad.jsonl"),
        "{\"entity\": \"zonas\", \"action\": \"create\", \"body\": {}}\n{\"entity\": \"zonas\", \"action\": \"update\"}\n",
    )
    .unwrap();
    aqua(&temp)
        .args(["push", "bad.jsonl"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("error: line 2: update on zonas requires an id"));
}

#[test]
fn push_rejects_writes_to_reports() {
    let temp = setup();
    std::fs::write(
        temp.path().join("bad.jsonl"),
        "{\"entity\": \"informes\", \"action\": \"create\", \"body\": {}}\n",
    )
    .unwrap();
    aqua(&temp)
        .args(["push", "bad.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 1: informes does not accept create"));
}

#[test]
fn push_missing_file_fails() {
    let temp = setup();
    aqua(&temp)
        .args(["push", "nope.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open nope.jsonl"));
}
