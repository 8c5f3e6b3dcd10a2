// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use aqua_core::WriteRequest;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::backend::{Backend, BackendError, BackendResult};
use super::queue::{from_fn, Operation, OperationError};

/// Scripted backend that records every request it receives.
///
/// Responses are taken from a script in order; once the script is empty,
/// requests succeed with `Value::Null`.
#[derive(Default)]
pub struct MockBackend {
    sent: Mutex<Vec<WriteRequest>>,
    script: Mutex<VecDeque<BackendResult<Value>>>,
    reachable: AtomicBool,
    probes: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        MockBackend {
            reachable: AtomicBool::new(true),
            ..Default::default()
        }
    }

    /// Queue the response for the next `send`.
    pub fn respond(&self, result: BackendResult<Value>) {
        self.script.lock().unwrap().push_back(result);
    }

    /// Make the next `send` fail with a 500.
    pub fn fail_next(&self) {
        self.respond(Err(BackendError::Status {
            status: 500,
            body: "internal error".into(),
        }));
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<WriteRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

impl Backend for MockBackend {
    fn send(
        &self,
        request: WriteRequest,
    ) -> Pin<Box<dyn Future<Output = BackendResult<Value>> + Send + '_>> {
        self.sent.lock().unwrap().push(request);
        let result = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Value::Null));
        Box::pin(async move { result })
    }

    fn probe(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        let reachable = self.reachable.load(Ordering::SeqCst);
        Box::pin(async move { reachable })
    }
}

/// Operation log shared between test operations.
pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// An operation that records `name` in `log` on every call and succeeds.
pub fn ok_op(name: &'static str, log: &CallLog) -> impl Operation {
    scripted_op(name, log, Vec::new())
}

/// An operation that records `name` in `log` on every call and always fails.
pub fn failing_op(name: &'static str, log: &CallLog) -> impl Operation {
    let log = Arc::clone(log);
    from_fn(move || {
        log.lock().unwrap().push(name);
        async move { Err::<(), _>(OperationError::Failed(format!("{name} failed"))) }
    })
}

/// An operation that records `name` in `log` and then panics while running.
pub fn panicking_op(name: &'static str, log: &CallLog) -> impl Operation {
    let log = Arc::clone(log);
    from_fn(move || {
        log.lock().unwrap().push(name);
        async move {
            if name.is_empty() {
                return Ok(());
            }
            panic!("{name} exploded")
        }
    })
}

/// An operation whose n-th call returns `outcomes[n]` (true = success);
/// calls past the end of the script succeed.
pub fn scripted_op(name: &'static str, log: &CallLog, outcomes: Vec<bool>) -> impl Operation {
    let log = Arc::clone(log);
    let calls = Arc::new(AtomicUsize::new(0));
    from_fn(move || {
        log.lock().unwrap().push(name);
        let n = calls.fetch_add(1, Ordering::SeqCst);
        let ok = outcomes.get(n).copied().unwrap_or(true);
        async move {
            if ok {
                Ok(())
            } else {
                Err(OperationError::Failed(format!("{name} failed")))
            }
        }
    })
}

/// Serve a single HTTP request on localhost with the given status and body.
///
/// The join handle resolves to the raw request text (head and body).
pub async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (SocketAddr, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        let head_end = loop {
            let n = stream.read(&mut buf).await.unwrap();
            raw.extend_from_slice(&buf[..n]);
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            assert!(n > 0, "connection closed before headers");
        };

        let head = String::from_utf8_lossy(&raw[..head_end]).to_lowercase();
        let content_length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .map(|v| v.trim().parse::<usize>().unwrap())
            .unwrap_or(0);
        while raw.len() < head_end + content_length {
            let n = stream.read(&mut buf).await.unwrap();
            assert!(n > 0, "connection closed before body");
            raw.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();

        String::from_utf8_lossy(&raw).into_owned()
    });

    (addr, handle)
}
