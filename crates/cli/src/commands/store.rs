// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local record store commands.

use std::io::{self, Write};

use aqua_core::LocalStore;
use serde_json::Value;

use crate::cli::StoreCommand;
use crate::error::Result;

use super::Context;

pub fn run(ctx: &Context, command: StoreCommand) -> Result<()> {
    let store = ctx.open_store()?;
    let stdout = io::stdout();
    run_impl(&store, command, &mut stdout.lock())
}

/// Internal implementation that accepts the store and output for testing.
pub(crate) fn run_impl(store: &LocalStore, command: StoreCommand, out: &mut impl Write) -> Result<()> {
    match command {
        StoreCommand::List { collection } => list(store, &collection, out),
        StoreCommand::NextId { collection } => {
            writeln!(out, "{}", store.next_id(&collection)?)?;
            Ok(())
        }
        StoreCommand::Put { collection, json } => {
            let record: Value = serde_json::from_str(&json)?;
            let id = store.insert(&collection, record)?;
            tracing::info!(collection = %collection, id, "stored record");
            writeln!(out, "{}", id)?;
            Ok(())
        }
    }
}

fn list(store: &LocalStore, collection: &str, out: &mut impl Write) -> Result<()> {
    for record in store.read_all(collection)? {
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
