// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Domain entities and their REST endpoints.
//!
//! Every collection the delivery backend exposes is an [`Entity`]. Entities
//! know their REST paths, the name of their local store, and which domain
//! events a write on them produces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A REST collection of the delivery backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    /// Customers receiving deliveries.
    Clientes,
    /// Product catalog (bottles, jugs, dispensers).
    Productos,
    /// Delivery orders.
    Pedidos,
    /// Payments recorded against clients.
    Pagos,
    /// Delivery zones.
    Zonas,
    /// Accepted payment methods.
    #[serde(rename = "tiposdepago", alias = "tiposPago")]
    TiposPago,
    /// Aggregated reports. Read-only on the backend.
    Informes,
}

impl Entity {
    /// All entities, in the order the backend documents them.
    pub const ALL: [Entity; 7] = [
        Entity::Clientes,
        Entity::Productos,
        Entity::Pedidos,
        Entity::Pagos,
        Entity::Zonas,
        Entity::TiposPago,
        Entity::Informes,
    ];

    /// Returns the name used in REST paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Clientes => "clientes",
            Entity::Productos => "productos",
            Entity::Pedidos => "pedidos",
            Entity::Pagos => "pagos",
            Entity::Zonas => "zonas",
            Entity::TiposPago => "tiposdepago",
            Entity::Informes => "informes",
        }
    }

    /// Returns the name of the local store holding this entity's records.
    pub fn store_name(&self) -> &'static str {
        match self {
            Entity::TiposPago => "tiposPago",
            other => other.as_str(),
        }
    }

    /// Path of the collection, e.g. `/api/clientes`.
    pub fn collection_path(&self) -> String {
        format!("/api/{}", self.as_str())
    }

    /// Path of a single item, e.g. `/api/clientes/7`.
    pub fn item_path(&self, id: u64) -> String {
        format!("/api/{}/{}", self.as_str(), id)
    }

    /// Whether the backend accepts writes of the given kind on this entity.
    pub fn accepts(&self, _action: Action) -> bool {
        !matches!(self, Entity::Informes)
    }

    /// Singular name used in domain event names. Only clients, products and
    /// orders publish domain events.
    pub fn singular(&self) -> Option<&'static str> {
        match self {
            Entity::Clientes => Some("cliente"),
            Entity::Productos => Some("producto"),
            Entity::Pedidos => Some("pedido"),
            _ => None,
        }
    }

    /// The domain event a successful write of `action` publishes, if any.
    pub fn domain_event(&self, action: Action) -> Option<DomainEvent> {
        self.singular().map(|_| DomainEvent {
            entity: *self,
            action,
        })
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Entity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        Entity::ALL
            .into_iter()
            .find(|e| e.as_str() == lower || e.store_name().to_lowercase() == lower)
            .ok_or_else(|| Error::UnknownEntity(s.to_string()))
    }
}

/// Kind of write performed against an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// HTTP method used for this action.
    pub fn method(&self) -> &'static str {
        match self {
            Action::Create => "POST",
            Action::Update => "PUT",
            Action::Delete => "DELETE",
        }
    }

    /// Past-tense suffix used in domain event names.
    pub fn past_tense(&self) -> &'static str {
        match self {
            Action::Create => "created",
            Action::Update => "updated",
            Action::Delete => "deleted",
        }
    }

    /// Whether the action targets an existing item and so needs an id.
    pub fn needs_id(&self) -> bool {
        !matches!(self, Action::Create)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

/// An application-level change notification, e.g. `pedido:created`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainEvent {
    pub entity: Entity,
    pub action: Action,
}

impl DomainEvent {
    /// The event name subscribers register under.
    pub fn name(&self) -> String {
        let subject = self.entity.singular().unwrap_or(self.entity.as_str());
        format!("{}:{}", subject, self.action.past_tense())
    }
}

impl fmt::Display for DomainEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
