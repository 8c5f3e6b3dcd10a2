// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Write requests against the delivery backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{Action, DomainEvent, Entity};
use crate::error::{Error, Result};

/// One create, update or delete against an entity collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteRequest {
    pub entity: Entity,
    pub action: Action,
    /// Target item. Required for updates and deletes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// JSON body sent with creates and updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl WriteRequest {
    pub fn create(entity: Entity, body: Value) -> Self {
        WriteRequest {
            entity,
            action: Action::Create,
            id: None,
            body: Some(body),
        }
    }

    pub fn update(entity: Entity, id: u64, body: Value) -> Self {
        WriteRequest {
            entity,
            action: Action::Update,
            id: Some(id),
            body: Some(body),
        }
    }

    pub fn delete(entity: Entity, id: u64) -> Self {
        WriteRequest {
            entity,
            action: Action::Delete,
            id: Some(id),
            body: None,
        }
    }

    /// Checks that the entity accepts the action and that an id is present
    /// where one is needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedAction`] for writes on read-only entities
    /// and [`Error::MissingId`] for updates or deletes without an id.
    pub fn validate(&self) -> Result<()> {
        if !self.entity.accepts(self.action) {
            return Err(Error::UnsupportedAction {
                entity: self.entity.as_str(),
                action: self.action.as_str(),
            });
        }
        if self.action.needs_id() && self.id.is_none() {
            return Err(Error::MissingId {
                entity: self.entity.as_str(),
                action: self.action.as_str(),
            });
        }
        Ok(())
    }

    /// REST path the request is sent to.
    pub fn path(&self) -> Result<String> {
        self.validate()?;
        match self.id {
            Some(id) if self.action.needs_id() => Ok(self.entity.item_path(id)),
            _ => Ok(self.entity.collection_path()),
        }
    }

    /// Domain event published once the write succeeds.
    pub fn domain_event(&self) -> Option<DomainEvent> {
        self.entity.domain_event(self.action)
    }
}

impl std::fmt::Display for WriteRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "{} {}/{}", self.action, self.entity, id),
            None => write!(f, "{} {}", self.action, self.entity),
        }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
