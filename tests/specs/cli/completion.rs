// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Completion command specs.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

fn aqua() -> Command {
    cargo_bin_cmd!("aqua")
}

#[yare::parameterized(
    bash = { "bash" },
    zsh = { "zsh" },
    fish = { "fish" },
)]
fn completion_generates_non_empty_output(shell: &str) {
    let output = aqua().args(["completion", shell]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("aqua"));
}

#[test]
fn completion_ignores_broken_config() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::write(temp.path().join("aqua.toml"), "[backend\n").unwrap();

    aqua()
        .args(["completion", "bash"])
        .current_dir(temp.path())
        .assert()
        .success();
}

#[test]
fn completion_invalid_shell_fails() {
    aqua().args(["completion", "tcsh"]).assert().failure();
}
