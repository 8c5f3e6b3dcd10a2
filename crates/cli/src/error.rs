// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::{BackendError, QueueError};

/// All possible errors that can occur in the aquars library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(aqua_core::Error),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("line {line}: {reason}")]
    ParseLineError { line: usize, reason: String },

    #[error("{remaining} operation(s) still queued\n  hint: the backend is unreachable; retry with a longer --wait")]
    PendingOperations { remaining: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// A specialized Result type for aquars operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<aqua_core::Error> for Error {
    fn from(e: aqua_core::Error) -> Self {
        match e {
            aqua_core::Error::Io(e) => Error::Io(e),
            aqua_core::Error::Json(e) => Error::Json(e),
            other => Error::Core(other),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
