// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! aquars - Offline-first sync tools for the AquaDelivery backend.
//!
//! This crate provides the functionality behind the `aqua` CLI: writes to the
//! delivery REST API that survive connectivity loss by waiting in an
//! in-memory queue until the backend is reachable again.
//!
//! # Main Components
//!
//! - [`sync::ConnectivityMonitor`] - Online/offline state with change subscribers
//! - [`sync::SyncQueue`] - Ordered queue of deferred writes, drained on reconnect
//! - [`sync::Heartbeat`] - Background health probe feeding the monitor
//! - [`sync::HttpBackend`] - reqwest client for the REST endpoints
//! - [`Config`] - TOML configuration (backend, heartbeat, store)
//!
//! # Offline writes
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aquars::sync::{ConnectivityMonitor, HttpBackend, SyncQueue, WriteOp};
//!
//! let monitor = Arc::new(ConnectivityMonitor::new(false));
//! let queue = Arc::new(SyncQueue::new(Arc::clone(&monitor)));
//! let _sub = queue.attach()?;
//!
//! let backend = Arc::new(HttpBackend::new(url, timeout, None)?);
//! queue.submit(Box::new(WriteOp::new(request, backend)?)).await;
//!
//! // Later, when the platform reports connectivity:
//! monitor.set_online(true); // queued writes replay in order
//! ```

mod cli;
mod commands;
pub mod config;
pub mod env;
pub mod error;
pub mod sync;

pub use cli::{Cli, Command, OutputFormat, StoreCommand};
pub use config::Config;
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

use commands::Context;

/// Execute a CLI invocation. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    if let Command::Completion { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "aqua", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = Context::load(cli.config)?;
    match cli.command {
        Command::Status { output } => commands::status::run(&ctx, output),
        Command::Push { file, wait } => commands::push::run(&ctx, &file, wait),
        Command::Store(cmd) => commands::store::run(&ctx, cmd),
        Command::Completion { .. } => Ok(()),
    }
}
