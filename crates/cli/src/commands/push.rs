// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Push write requests to the backend through the offline queue.
//!
//! Each request is tried once right away. Whatever fails, or everything when
//! the backend is unreachable, stays queued; with `--wait` the heartbeat keeps
//! probing and the queue drains on reconnect until it is empty or time runs
//! out.

use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use aqua_core::{handler, Action, Entity, EventBus, WriteRequest};
use serde_json::Value;
use tokio::sync::Notify;

use crate::error::{Error, Result};
use crate::sync::{
    probe_once, Backend, ConnectivityMonitor, Heartbeat, HeartbeatConfig, Submitted, SyncQueue,
    WriteOp,
};

use super::{runtime, Context};

/// Fallback retry period when the heartbeat is disabled.
const DEFAULT_RETRY: Duration = Duration::from_secs(1);

/// Counts reported after a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushSummary {
    pub total: usize,
    /// Sent on the first attempt.
    pub sent: usize,
    /// Queued after the first attempt.
    pub deferred: usize,
    /// Still queued when the push gave up.
    pub remaining: usize,
}

pub fn run(ctx: &Context, file: &Path, wait: u64) -> Result<()> {
    let requests = read_requests(file)?;
    let backend = ctx.backend()?;
    let heartbeat = ctx.config.heartbeat.to_heartbeat_config();
    let bus: Arc<EventBus> = Arc::new(EventBus::new());
    announce_events(&bus, Arc::new(Mutex::new(io::stdout())));

    let summary = runtime()?.block_on(async {
        let monitor = Arc::new(ConnectivityMonitor::default());
        let queue = SyncQueue::new(monitor);
        push_all(
            &queue,
            backend,
            bus,
            requests,
            heartbeat,
            Duration::from_secs(wait),
        )
        .await
    })?;

    println!(
        "Pushed {} request(s): {} sent, {} queued",
        summary.total, summary.sent, summary.deferred
    );
    if summary.remaining > 0 {
        return Err(Error::PendingOperations {
            remaining: summary.remaining,
        });
    }
    if summary.deferred > 0 {
        println!("All queued requests replayed");
    }
    Ok(())
}

/// Print every domain event published by a successful write to `out`.
///
/// Write errors such as a closed pipe are logged and otherwise ignored.
fn announce_events<W: Write + Send + 'static>(bus: &EventBus, out: Arc<Mutex<W>>) {
    for entity in Entity::ALL {
        for action in [Action::Create, Action::Update, Action::Delete] {
            let Some(event) = entity.domain_event(action) else {
                continue;
            };
            let name = event.name();
            let out = Arc::clone(&out);
            bus.on(
                &event.name(),
                handler(move |payload: &Value| {
                    let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
                    if let Err(e) = writeln!(out, "{} {}", name, payload) {
                        tracing::debug!(event = %name, "cannot print event: {}", e);
                    }
                }),
            );
        }
    }
}

fn read_requests(file: &Path) -> Result<Vec<WriteRequest>> {
    if file.as_os_str() == "-" {
        return parse_requests(io::stdin().lock());
    }
    let handle = std::fs::File::open(file).map_err(|e| {
        Error::Io(io::Error::other(format!(
            "cannot open {}: {}",
            file.display(),
            e
        )))
    })?;
    parse_requests(BufReader::new(handle))
}

/// Parse JSON Lines of write requests, skipping blank lines.
///
/// Malformed lines and invalid requests (writes on read-only entities,
/// missing ids) are rejected with their line number before anything is sent.
pub(crate) fn parse_requests(reader: impl BufRead) -> Result<Vec<WriteRequest>> {
    let mut requests = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parse_error = |reason: String| Error::ParseLineError {
            line: line_num + 1,
            reason,
        };
        let request: WriteRequest =
            serde_json::from_str(line).map_err(|e| parse_error(e.to_string()))?;
        request.validate().map_err(|e| parse_error(e.to_string()))?;
        requests.push(request);
    }
    Ok(requests)
}

/// Submit every request, then keep draining for up to `wait`.
pub(crate) async fn push_all(
    queue: &SyncQueue,
    backend: Arc<dyn Backend>,
    bus: Arc<EventBus>,
    requests: Vec<WriteRequest>,
    heartbeat: HeartbeatConfig,
    wait: Duration,
) -> Result<PushSummary> {
    let monitor = Arc::clone(queue.monitor());
    probe_once(&monitor, backend.as_ref(), heartbeat.timeout).await;

    let total = requests.len();
    let mut sent = 0;
    for request in requests {
        let op = WriteOp::new(request, Arc::clone(&backend))?.with_events(Arc::clone(&bus));
        if queue.submit(Box::new(op)).await == Submitted::Completed {
            sent += 1;
        }
    }
    let deferred = queue.len();
    tracing::info!(total, sent, deferred, "initial push finished");

    if deferred > 0 && !wait.is_zero() {
        let reconnected = Arc::new(Notify::new());
        let signal = Arc::clone(&reconnected);
        let subscription = monitor.on_connection_change(move |online| {
            if online {
                signal.notify_one();
            }
        });
        let _heartbeat = Heartbeat::spawn(Arc::clone(&monitor), backend, heartbeat);
        let retry = if heartbeat.interval.is_zero() {
            DEFAULT_RETRY
        } else {
            heartbeat.interval
        };
        if tokio::time::timeout(wait, drain_until_empty(queue, &reconnected, retry))
            .await
            .is_err()
        {
            tracing::warn!(remaining = queue.len(), ?wait, "gave up waiting for the queue");
        }
        subscription.unsubscribe();
    }

    Ok(PushSummary {
        total,
        sent,
        deferred,
        remaining: queue.len(),
    })
}

/// Drain on every reconnect, and every `retry` in between for writes the
/// server rejected while it stayed reachable, until the queue is empty.
///
/// Cancelling this future mid-drain puts unfinished writes back in the queue.
async fn drain_until_empty(queue: &SyncQueue, reconnected: &Notify, retry: Duration) {
    while !queue.is_empty() {
        tokio::select! {
            _ = reconnected.notified() => {}
            _ = tokio::time::sleep(retry) => {}
        }
        queue.process().await;
    }
}

#[cfg(test)]
#[path = "push_tests.rs"]
mod tests;
