// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backend reachability and local store status.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::sync::{probe_once, Backend, ConnectivityMonitor};

use super::{runtime, Context};

/// What `aqua status` reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub backend: String,
    pub online: bool,
    pub store: PathBuf,
}

pub fn run(ctx: &Context, output: OutputFormat) -> Result<()> {
    let backend = ctx.backend()?;
    let timeout = ctx.config.heartbeat.to_heartbeat_config().timeout;
    let online = runtime()?.block_on(check(backend.as_ref(), timeout));

    let report = StatusReport {
        backend: ctx.config.backend.url.clone(),
        online,
        store: ctx.store_dir(),
    };
    let stdout = io::stdout();
    render(&report, output, &mut stdout.lock())
}

/// Probe the backend once, bounded by `timeout`.
pub(crate) async fn check(backend: &dyn Backend, timeout: Duration) -> bool {
    let monitor = ConnectivityMonitor::default();
    probe_once(&monitor, backend, timeout).await
}

pub(crate) fn render(report: &StatusReport, output: OutputFormat, out: &mut impl Write) -> Result<()> {
    match output {
        OutputFormat::Text => {
            let state = if report.online { "online" } else { "offline" };
            writeln!(out, "Backend: {}", report.backend)?;
            writeln!(out, "Status: {}", state)?;
            writeln!(out, "Store: {}", report.store.display())?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string(report)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
