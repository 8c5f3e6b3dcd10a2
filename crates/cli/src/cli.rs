// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

const QUICKSTART_HELP: &str = "\
Get started:
  aqua status                     Check the backend is reachable
  aqua push writes.jsonl          Send queued writes to the backend
  aqua push writes.jsonl -w 60    Keep retrying for up to a minute
  aqua store list clientes        Show locally stored records";

#[derive(Parser)]
#[command(name = "aqua")]
#[command(version)]
#[command(about = "Offline-first sync tools for the AquaDelivery backend")]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Config file (default: $AQUA_CONFIG, then ./aqua.toml)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show backend reachability and local store location
    Status {
        /// Output format
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Send write requests to the backend, queuing any that fail
    #[command(after_help = "Input is JSON Lines, one write request per line:\n  \
        {\"entity\": \"clientes\", \"action\": \"create\", \"body\": {\"nombre\": \"Ana\"}}\n  \
        {\"entity\": \"zonas\", \"action\": \"update\", \"id\": 2, \"body\": {\"nombre\": \"Sur\"}}\n  \
        {\"entity\": \"pedidos\", \"action\": \"delete\", \"id\": 7}")]
    Push {
        /// JSONL file of write requests ('-' for stdin)
        file: PathBuf,

        /// Seconds to keep retrying queued writes while the backend is unreachable
        #[arg(long, short, default_value_t = 0)]
        wait: u64,
    },

    /// Inspect and edit the local record store
    #[command(subcommand)]
    Store(StoreCommand),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Local store commands.
#[derive(Subcommand)]
pub enum StoreCommand {
    /// Print every record in a collection, one JSON object per line
    List {
        /// Collection name (e.g. clientes, tiposPago)
        collection: String,
    },
    /// Print the id the next new record would get
    NextId {
        /// Collection name
        collection: String,
    },
    /// Insert or replace a record; assigns the next id when absent
    Put {
        /// Collection name
        collection: String,
        /// Record as a JSON object
        json: String,
    },
}

#[cfg(test)]
#[path = "cli_tests/mod.rs"]
mod tests;
