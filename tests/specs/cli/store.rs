// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `aqua store` specs.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn aqua(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("aqua");
    cmd.env_remove("AQUA_CONFIG").current_dir(temp.path());
    cmd
}

#[test]
fn next_id_starts_at_one() {
    let temp = TempDir::new().unwrap();
    aqua(&temp)
        .args(["store", "next-id", "clientes"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn put_assigns_sequential_ids() {
    let temp = TempDir::new().unwrap();
    aqua(&temp)
        .args(["store", "put", "zonas", r#"{"nombre":"Norte"}"#])
        .assert()
        .success()
        .stdout("1\n");
    aqua(&temp)
        .args(["store", "put", "zonas", r#"{"nombre":"Sur"}"#])
        .assert()
        .success()
        .stdout("2\n");
    aqua(&temp)
        .args(["store", "next-id", "zonas"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn list_prints_records_as_json_lines() {
    let temp = TempDir::new().unwrap();
    aqua(&temp)
        .args(["store", "put", "tiposPago", r#"{"id":5,"nombre":"Efectivo"}"#])
        .assert()
        .success();

    let output = aqua(&temp)
        .args(["store", "list", "tiposPago"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let lines: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(
        lines,
        vec![serde_json::json!({"id": 5, "nombre": "Efectivo"})]
    );
    assert!(temp.path().join(".aqua/tiposPago.jsonl").is_file());
}

#[test]
fn list_empty_collection_prints_nothing() {
    let temp = TempDir::new().unwrap();
    aqua(&temp)
        .args(["store", "list", "pedidos"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn store_dir_follows_config() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("aqua.toml"), "[store]\ndir = \"data\"\n").unwrap();

    aqua(&temp)
        .args(["store", "put", "clientes", r#"{"nombre":"Ana"}"#])
        .assert()
        .success();
    assert!(temp.path().join("data/clientes.jsonl").is_file());
}

#[test]
fn put_rejects_invalid_json() {
    let temp = TempDir::new().unwrap();
    aqua(&temp)
        .args(["store", "put", "zonas", "{nombre"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: json error"));
}

#[test]
fn invalid_collection_name_fails() {
    let temp = TempDir::new().unwrap();
    aqua(&temp)
        .args(["store", "list", "../secrets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid collection name"));
}
