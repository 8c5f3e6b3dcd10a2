// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backend abstraction for the delivery REST API.
//!
//! Provides a trait-based seam so that:
//! - Real HTTP requests go through [`HttpBackend`] in production
//! - Tests can swap in a scripted backend

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use aqua_core::{Action, WriteRequest};
use serde_json::Value;
use url::Url;

/// Error type for backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never got a response (DNS, connect, timeout, ...).
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request itself is malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] aqua_core::Error),

    /// The configured base URL is unusable.
    #[error("invalid backend url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Remote side of the sync layer.
///
/// Any non-success response or transport error must surface as an `Err`
/// so that queued writes are retried.
pub trait Backend: Send + Sync {
    /// Perform one write and return the decoded response body
    /// (`Value::Null` when the server sends none).
    fn send(
        &self,
        request: WriteRequest,
    ) -> Pin<Box<dyn Future<Output = BackendResult<Value>> + Send + '_>>;

    /// Check whether the backend is reachable.
    fn probe(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>>;
}

/// Path of the health endpoint used by [`Backend::probe`].
pub const HEALTH_PATH: &str = "/health";

/// HTTP backend implementation using reqwest.
pub struct HttpBackend {
    base: Url,
    client: reqwest::Client,
    token: Option<String>,
}

impl HttpBackend {
    /// Create a backend for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration, token: Option<String>) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        Self::with_client(base_url, client, token)
    }

    /// Create a backend around a preconfigured client.
    pub fn with_client(
        base_url: &str,
        client: reqwest::Client,
        token: Option<String>,
    ) -> BackendResult<Self> {
        let base = Url::parse(base_url).map_err(|e| BackendError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(HttpBackend {
            base,
            client,
            token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for an API path such as `/api/clientes/3`.
    pub fn url_for(&self, path: &str) -> BackendResult<Url> {
        self.base.join(path).map_err(|e| BackendError::InvalidUrl {
            url: format!("{}{}", self.base, path),
            reason: e.to_string(),
        })
    }
}

fn method_for(action: Action) -> reqwest::Method {
    match action {
        Action::Create => reqwest::Method::POST,
        Action::Update => reqwest::Method::PUT,
        Action::Delete => reqwest::Method::DELETE,
    }
}

/// Decode a response body, treating an empty body as `Value::Null`.
pub(crate) fn decode_body(text: &str) -> BackendResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| BackendError::InvalidResponse(e.to_string()))
}

impl Backend for HttpBackend {
    fn send(
        &self,
        request: WriteRequest,
    ) -> Pin<Box<dyn Future<Output = BackendResult<Value>> + Send + '_>> {
        Box::pin(async move {
            let url = self.url_for(&request.path()?)?;

            let mut builder = self.client.request(method_for(request.action), url);
            if let Some(token) = &self.token {
                builder = builder.bearer_auth(token);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

            if !status.is_success() {
                return Err(BackendError::Status {
                    status: status.as_u16(),
                    body: text,
                });
            }
            decode_body(&text)
        })
    }

    fn probe(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(async move {
            let Ok(url) = self.url_for(HEALTH_PATH) else {
                return false;
            };
            match self.client.get(url).send().await {
                Ok(response) => response.status().is_success(),
                Err(e) => {
                    tracing::debug!("health probe failed: {}", e);
                    false
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
