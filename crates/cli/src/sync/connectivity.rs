// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity monitor.
//!
//! Mirrors the platform's online/offline signal and notifies subscribers of
//! transitions. The platform (or the heartbeat standing in for it) pushes
//! state changes through [`ConnectivityMonitor::set_online`]; the monitor
//! never polls on its own and does not debounce, so every transition produces
//! exactly one notification per subscriber.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use aqua_core::bus::describe_panic;

/// Callback invoked with the new state on every transition.
pub type ConnectionCallback = Arc<dyn Fn(bool) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, ConnectionCallback)>,
}

fn lock(listeners: &Mutex<Listeners>) -> MutexGuard<'_, Listeners> {
    listeners.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Tracks whether the host is online and fans transitions out to subscribers.
pub struct ConnectivityMonitor {
    online: AtomicBool,
    listeners: Arc<Mutex<Listeners>>,
}

impl ConnectivityMonitor {
    /// Create a monitor starting in the given state.
    pub fn new(online: bool) -> Self {
        ConnectivityMonitor {
            online: AtomicBool::new(online),
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    /// Current connectivity as last reported by the platform.
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Register `callback` to run on every transition.
    ///
    /// Dropping the returned [`Subscription`] leaves the callback registered;
    /// call [`Subscription::unsubscribe`] to remove it.
    pub fn on_connection_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let mut listeners = lock(&self.listeners);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(callback)));

        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Report the platform state.
    ///
    /// Returns `true` if this was a transition. Subscribers are notified in
    /// registration order only on transitions; repeating the current state is
    /// a no-op. A subscriber that panics is logged and skipped.
    pub fn set_online(&self, online: bool) -> bool {
        if self.online.swap(online, Ordering::SeqCst) == online {
            return false;
        }

        tracing::info!(online, "connectivity changed");

        let snapshot: Vec<ConnectionCallback> = lock(&self.listeners)
            .entries
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        for callback in snapshot {
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| callback(online))) {
                tracing::error!(
                    online,
                    "connectivity subscriber panicked: {}",
                    describe_panic(&*panic)
                );
            }
        }
        true
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }
}

impl Default for ConnectivityMonitor {
    /// Starts offline until the platform reports otherwise.
    fn default() -> Self {
        Self::new(false)
    }
}

/// Handle to one [`ConnectivityMonitor`] registration.
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Subscription {
    /// Remove exactly this registration, leaving others intact.
    pub fn unsubscribe(self) {
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).entries.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
