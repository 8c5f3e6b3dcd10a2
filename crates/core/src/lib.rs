// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! aqua-core: Shared domain types for the AquaDelivery sync tools.
//!
//! This crate provides the entity catalog, write requests, the in-process
//! event bus and the local record store used by the `aqua` CLI and its
//! offline sync queue.

pub mod bus;
pub mod entity;
pub mod error;
pub mod request;
pub mod store;

pub use bus::{handler, EventBus, Handler};
pub use entity::{Action, DomainEvent, Entity};
pub use error::{Error, Result};
pub use request::WriteRequest;
pub use store::LocalStore;
