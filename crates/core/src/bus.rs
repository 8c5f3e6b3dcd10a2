// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-process publish/subscribe for domain-change notifications.
//!
//! Producers emit events by name (see [`DomainEvent::name`]) and consumers
//! register handlers without either side knowing about the other. Dispatch is
//! synchronous: [`EventBus::emit`] returns once every handler has run.
//!
//! Handlers are compared by identity (`Arc` pointer), so keep the
//! [`Handler`] you registered if you want to remove it later.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::entity::DomainEvent;

/// A registered event handler.
pub type Handler<P> = Arc<dyn Fn(&P) + Send + Sync>;

/// Wraps a closure as a [`Handler`].
pub fn handler<P, F>(f: F) -> Handler<P>
where
    F: Fn(&P) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Event bus keyed by event name.
pub struct EventBus<P = Value> {
    handlers: Mutex<HashMap<String, Vec<Handler<P>>>>,
}

impl<P> EventBus<P> {
    pub fn new() -> Self {
        EventBus {
            handlers: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Handler<P>>>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `handler` under `event`.
    ///
    /// Registering the same handler twice makes it run twice per emission.
    pub fn on(&self, event: &str, handler: Handler<P>) {
        self.lock().entry(event.to_string()).or_default().push(handler);
    }

    /// Removes the first registration of `handler` under `event`.
    pub fn off(&self, event: &str, handler: &Handler<P>) {
        let mut handlers = self.lock();
        if let Some(list) = handlers.get_mut(event) {
            if let Some(pos) = list.iter().position(|h| Arc::ptr_eq(h, handler)) {
                list.remove(pos);
            }
        }
    }

    /// Invokes every handler registered under `event`, in registration order.
    ///
    /// A handler that panics is logged and skipped; the remaining handlers
    /// still run. Returns the number of handlers that completed.
    pub fn emit(&self, event: &str, payload: &P) -> usize {
        // Dispatch from a snapshot so handlers may call on/off.
        let snapshot: Vec<Handler<P>> = match self.lock().get(event) {
            Some(list) => list.clone(),
            None => return 0,
        };

        let mut completed = 0;
        for handler in snapshot {
            match catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                Ok(()) => completed += 1,
                Err(panic) => {
                    tracing::error!(event, "event handler panicked: {}", describe_panic(&*panic));
                }
            }
        }
        completed
    }

    /// Emits a domain event under its canonical name.
    pub fn publish(&self, event: DomainEvent, payload: &P) -> usize {
        self.emit(&event.name(), payload)
    }

    /// Removes every registration for every event.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of handlers registered under `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.lock().get(event).map_or(0, Vec::len)
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Best-effort text of a caught panic payload.
pub fn describe_panic(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
