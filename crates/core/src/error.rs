// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for aqua-core operations.

use thiserror::Error;

/// All possible errors that can occur in aqua-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown entity: '{0}'\n  hint: valid entities are: clientes, productos, pedidos, pagos, zonas, tiposdepago, informes")]
    UnknownEntity(String),

    #[error("invalid action: '{0}'\n  hint: valid actions are: create, update, delete")]
    InvalidAction(String),

    #[error("{action} on {entity} requires an id")]
    MissingId {
        entity: &'static str,
        action: &'static str,
    },

    #[error("{entity} does not accept {action}")]
    UnsupportedAction {
        entity: &'static str,
        action: &'static str,
    },

    #[error("invalid collection name: '{0}'")]
    InvalidCollection(String),

    #[error("record in {collection} has no numeric id")]
    MissingRecordId { collection: String },

    #[error("no ids left in {collection}: largest id is already {max}")]
    IdExhausted { collection: String, max: u64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for aqua-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
