// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reachability heartbeat.
//!
//! Without a platform network signal, a background task probes the backend's
//! health endpoint and feeds the result into the [`ConnectivityMonitor`].

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::backend::Backend;
use super::connectivity::ConnectivityMonitor;

/// Timing for the heartbeat task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    /// Time between probes. Zero disables the heartbeat.
    pub interval: Duration,
    /// Upper bound on a single probe; a probe that takes longer counts as
    /// offline.
    pub timeout: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        HeartbeatConfig {
            interval: Duration::from_secs(30),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Probe `backend` once, bounded by `timeout`, and report the result.
pub async fn probe_once(
    monitor: &ConnectivityMonitor,
    backend: &dyn Backend,
    timeout: Duration,
) -> bool {
    let online = tokio::time::timeout(timeout, backend.probe())
        .await
        .unwrap_or_else(|_| {
            tracing::debug!(?timeout, "health probe timed out");
            false
        });
    monitor.set_online(online);
    online
}

/// Handle to a running heartbeat task. The task stops when the handle is
/// dropped or [`Heartbeat::stop`] is called.
pub struct Heartbeat {
    handle: Option<JoinHandle<()>>,
}

impl Heartbeat {
    /// Spawn the heartbeat on the current tokio runtime.
    ///
    /// The first probe runs immediately. With a zero interval no task is
    /// spawned and the monitor is left alone.
    pub fn spawn(
        monitor: Arc<ConnectivityMonitor>,
        backend: Arc<dyn Backend>,
        config: HeartbeatConfig,
    ) -> Self {
        if config.interval.is_zero() {
            tracing::debug!("heartbeat disabled");
            return Heartbeat { handle: None };
        }

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                probe_once(&monitor, backend.as_ref(), config.timeout).await;
            }
        });

        Heartbeat {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop probing.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "heartbeat_tests.rs"]
mod tests;
