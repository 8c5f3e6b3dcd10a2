// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queued REST writes.

use std::sync::Arc;

use aqua_core::{EventBus, WriteRequest};
use serde_json::Value;

use super::backend::Backend;
use super::queue::{Operation, OperationFuture};

/// One REST write that can be attempted now or replayed later.
///
/// On success the entity's domain event (e.g. `cliente:created`) is published
/// on the attached bus with the server response as payload, or the request
/// body when the server returned nothing.
pub struct WriteOp {
    request: WriteRequest,
    backend: Arc<dyn Backend>,
    bus: Option<Arc<EventBus>>,
}

impl WriteOp {
    /// Create a write for `request`.
    ///
    /// # Errors
    ///
    /// Malformed requests (writes on read-only entities, missing ids) are
    /// rejected here rather than queued.
    pub fn new(request: WriteRequest, backend: Arc<dyn Backend>) -> aqua_core::Result<Self> {
        request.validate()?;
        Ok(WriteOp {
            request,
            backend,
            bus: None,
        })
    }

    /// Publish domain events on `bus` after successful writes.
    pub fn with_events(mut self, bus: Arc<EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn request(&self) -> &WriteRequest {
        &self.request
    }

    fn publish(&self, response: Value) {
        let (Some(bus), Some(event)) = (&self.bus, self.request.domain_event()) else {
            return;
        };
        let payload = match response {
            Value::Null => self.request.body.clone().unwrap_or(Value::Null),
            other => other,
        };
        bus.publish(event, &payload);
    }
}

impl Operation for WriteOp {
    fn execute(&self) -> OperationFuture<'_> {
        Box::pin(async move {
            let response = self.backend.send(self.request.clone()).await?;
            self.publish(response);
            Ok(())
        })
    }

    fn describe(&self) -> String {
        self.request.to_string()
    }
}

#[cfg(test)]
#[path = "op_tests.rs"]
mod tests;
