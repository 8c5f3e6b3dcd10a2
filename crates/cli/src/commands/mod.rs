// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod push;
pub mod status;
pub mod store;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::PathBuf;
use std::sync::Arc;

use aqua_core::LocalStore;

use crate::config::{resolve_path, Config};
use crate::env;
use crate::error::{Error, Result};
use crate::sync::{Backend, HttpBackend};

/// Loaded configuration plus where it came from.
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
}

impl Context {
    /// Resolve and load the config file named by `--config`, `AQUA_CONFIG`
    /// or the default location.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self> {
        let config_path = resolve_path(explicit, env::config_path());
        let config = Config::load(&config_path)?;
        Ok(Context {
            config,
            config_path,
        })
    }

    pub fn store_dir(&self) -> PathBuf {
        self.config.store_dir(&self.config_path)
    }

    /// Open the local store, creating its directory if needed.
    pub fn open_store(&self) -> Result<LocalStore> {
        Ok(LocalStore::open(&self.store_dir())?)
    }

    /// HTTP backend for the configured API.
    pub fn backend(&self) -> Result<Arc<dyn Backend>> {
        let backend = &self.config.backend;
        let http = HttpBackend::new(&backend.url, backend.timeout(), backend.resolved_token())?;
        Ok(Arc::new(http))
    }
}

/// Create the tokio runtime commands block on.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Io(std::io::Error::other(format!("tokio: {}", e))))
}
