// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-first sync layer for the delivery backend.
//!
//! Writes are attempted immediately when the host is online and deferred to
//! an in-memory queue otherwise. The queue drains itself when connectivity
//! returns.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  WriteOp    │────►│  SyncQueue  │────►│   Backend   │
//! │ (REST write)│     │  (offline)  │     │   (trait)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            ▲                   ▲
//!                            │ online            │ probe
//!                     ┌──────┴──────┐     ┌──────┴──────┐
//!                     │Connectivity │◄────│  Heartbeat  │
//!                     │  Monitor    │     │   (task)    │
//!                     └─────────────┘     └─────────────┘
//! ```

mod backend;
mod connectivity;
mod heartbeat;
mod op;
mod queue;

pub use backend::{Backend, BackendError, BackendResult, HttpBackend, HEALTH_PATH};
pub use connectivity::{ConnectionCallback, ConnectivityMonitor, Subscription};
pub use heartbeat::{probe_once, Heartbeat, HeartbeatConfig};
pub use op::WriteOp;
pub use queue::{
    from_fn, DrainOutcome, FnOperation, Operation, OperationError, OperationFuture, QueueError,
    Submitted, SyncQueue,
};

#[cfg(test)]
pub(crate) mod test_helpers;
