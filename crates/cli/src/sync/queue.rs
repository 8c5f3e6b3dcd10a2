// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline queue for replaying writes when connectivity returns.
//!
//! Operations that could not complete are appended in order and replayed by
//! [`SyncQueue::process`]. A drain snapshots the queue and clears it, so
//! anything added while the drain runs waits for the next one. Operations
//! that fail again go back to the tail. Nothing is persisted: a restart
//! discards whatever is still queued.

use std::collections::VecDeque;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use aqua_core::bus::describe_panic;
use futures_util::FutureExt;

use super::backend::BackendError;
use super::connectivity::{ConnectivityMonitor, Subscription};

/// Error returned by a queued operation.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    /// The backend rejected the write or could not be reached.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Any other failure.
    #[error("{0}")]
    Failed(String),

    /// The operation panicked.
    #[error("operation panicked: {0}")]
    Panicked(String),
}

/// Error type for queue setup.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// Auto-drain needs a tokio runtime to spawn onto.
    #[error("no tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Future returned by [`Operation::execute`].
pub type OperationFuture<'a> = Pin<Box<dyn Future<Output = Result<(), OperationError>> + Send + 'a>>;

/// A deferred unit of write work.
///
/// Implementations must report any failure as an error so that the queue
/// keeps the operation for another attempt.
pub trait Operation: Send + Sync {
    /// Perform the write once.
    fn execute(&self) -> OperationFuture<'_>;

    /// Short label used in logs.
    fn describe(&self) -> String {
        "operation".to_string()
    }
}

/// An [`Operation`] backed by a closure returning a future.
pub struct FnOperation<F> {
    f: F,
}

/// Wrap a closure as an [`Operation`].
pub fn from_fn<F, Fut>(f: F) -> FnOperation<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), OperationError>> + Send + 'static,
{
    FnOperation { f }
}

impl<F, Fut> Operation for FnOperation<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), OperationError>> + Send + 'static,
{
    fn execute(&self) -> OperationFuture<'_> {
        Box::pin((self.f)())
    }
}

/// What a call to [`SyncQueue::process`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Offline; the queue was left untouched.
    Offline { pending: usize },
    /// Another drain was already running; nothing was done.
    AlreadyDraining,
    /// A drain ran over the snapshot.
    Drained { succeeded: usize, failed: usize },
}

/// Run `op` once, reporting a panic as [`OperationError::Panicked`].
async fn attempt(op: &dyn Operation) -> Result<(), OperationError> {
    let panicked = |panic: Box<dyn std::any::Any + Send>| {
        OperationError::Panicked(describe_panic(&*panic).to_string())
    };
    let fut = catch_unwind(AssertUnwindSafe(move || op.execute())).map_err(panicked)?;
    AssertUnwindSafe(fut)
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(panicked(panic)))
}

/// Whether [`SyncQueue::submit`] completed the write or deferred it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Completed,
    Deferred,
}

type Pending = Vec<Box<dyn Operation>>;

/// In-memory queue of operations waiting for connectivity.
pub struct SyncQueue {
    monitor: Arc<ConnectivityMonitor>,
    pending: Mutex<Pending>,
    draining: AtomicBool,
    failed_attempts: AtomicU64,
}

impl SyncQueue {
    pub fn new(monitor: Arc<ConnectivityMonitor>) -> Self {
        SyncQueue {
            monitor,
            pending: Mutex::new(Vec::new()),
            draining: AtomicBool::new(false),
            failed_attempts: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The monitor this queue consults before draining.
    pub fn monitor(&self) -> &Arc<ConnectivityMonitor> {
        &self.monitor
    }

    /// Append an operation to the tail. No deduplication is done.
    pub fn add<O: Operation + 'static>(&self, op: O) {
        self.add_boxed(Box::new(op));
    }

    pub fn add_boxed(&self, op: Box<dyn Operation>) {
        tracing::debug!(op = %op.describe(), "queued");
        self.lock().push(op);
    }

    /// Number of queued operations right now.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether a drain is in flight.
    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::SeqCst)
    }

    /// Total failed replay attempts since the queue was created.
    pub fn failed_attempts(&self) -> u64 {
        self.failed_attempts.load(Ordering::SeqCst)
    }

    /// Try `op` now if online; queue it if offline or if it fails.
    pub async fn submit(&self, op: Box<dyn Operation>) -> Submitted {
        if self.monitor.is_online() {
            match attempt(&*op).await {
                Ok(()) => return Submitted::Completed,
                Err(e) => {
                    tracing::warn!(op = %op.describe(), "write failed, queuing: {}", e);
                }
            }
        }
        self.add_boxed(op);
        Submitted::Deferred
    }

    /// Replay every queued operation once, in order.
    ///
    /// Offline this is a no-op. A call made while another drain is running
    /// returns [`DrainOutcome::AlreadyDraining`]. Failures, panics included,
    /// are logged and re-queued behind anything added during the drain; they
    /// are never returned as errors.
    pub async fn process(&self) -> DrainOutcome {
        if !self.monitor.is_online() {
            let pending = self.len();
            tracing::info!(pending, "offline, deferring drain");
            return DrainOutcome::Offline { pending };
        }

        if self
            .draining
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("drain already in progress");
            return DrainOutcome::AlreadyDraining;
        }

        let mut pass = Pass {
            queue: self,
            remaining: std::mem::take(&mut *self.lock()).into(),
            in_flight: None,
            failed: Vec::new(),
            succeeded: 0,
        };
        tracing::info!(count = pass.remaining.len(), "draining offline queue");

        while let Some(op) = pass.remaining.pop_front() {
            let result = attempt(&**pass.in_flight.insert(op)).await;
            let Some(op) = pass.in_flight.take() else {
                break;
            };
            match result {
                Ok(()) => {
                    tracing::debug!(op = %op.describe(), "replayed");
                    pass.succeeded += 1;
                }
                Err(e) => {
                    tracing::warn!(op = %op.describe(), "replay failed: {}", e);
                    self.failed_attempts.fetch_add(1, Ordering::SeqCst);
                    pass.failed.push(op);
                }
            }
        }

        let outcome = DrainOutcome::Drained {
            succeeded: pass.succeeded,
            failed: pass.failed.len(),
        };
        drop(pass);
        tracing::info!(?outcome, pending = self.len(), "drain finished");
        outcome
    }

    /// Drain automatically whenever the monitor reports the host is back
    /// online. Drains are spawned on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::NoRuntime`] when called outside a runtime.
    pub fn attach(self: &Arc<Self>) -> Result<Subscription, QueueError> {
        let runtime = tokio::runtime::Handle::try_current()?;
        let queue = Arc::downgrade(self);

        Ok(self.monitor.on_connection_change(move |online| {
            if !online {
                return;
            }
            if let Some(queue) = queue.upgrade() {
                runtime.spawn(async move {
                    queue.process().await;
                });
            }
        }))
    }
}

/// Bookkeeping for one drain.
///
/// Dropping it returns failed, interrupted and unvisited operations to the
/// live queue and clears the draining flag, so a drain cancelled mid-way
/// loses nothing.
struct Pass<'a> {
    queue: &'a SyncQueue,
    remaining: VecDeque<Box<dyn Operation>>,
    in_flight: Option<Box<dyn Operation>>,
    failed: Vec<Box<dyn Operation>>,
    succeeded: usize,
}

impl Drop for Pass<'_> {
    fn drop(&mut self) {
        let mut pending = self.queue.lock();
        pending.append(&mut self.failed);
        pending.extend(self.in_flight.take());
        pending.extend(self.remaining.drain(..));
        drop(pending);
        self.queue.draining.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
