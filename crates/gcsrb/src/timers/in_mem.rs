//! 🧪 The stopwatch that never leaves the room.
//!
//! `InMemoryTransferTimer` hands back durations you scripted in advance and writes
//! down every request it was asked to time. No sockets. No DNS. No Oregon.
//! This is how failure paths get tested without a magic bucket name in production code.
//!
//! ⚠️ Not for production. If you're benchmarking regions with this, every region is
//! exactly as fast as you said it would be, which is a very flattering lie.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::timers::{PutRequest, TransferTimer};

/// 📝 One request the in-memory timer was asked to time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedRequest {
    pub method: &'static str,
    pub url: String,
    pub body_len: usize,
    pub headers: Vec<(&'static str, String)>,
}

/// 🎭 Canned-duration timer.
///
/// Each call pops the next scripted duration; once the script runs out, every call
/// reports `default_ms`. Clone-able so a test can keep a handle on `received`
/// after the timer has been handed off to a runner. The `Arc` means everyone sees
/// the same log.
#[derive(Debug, Clone)]
pub struct InMemoryTransferTimer {
    default_ms: f64,
    script: VecDeque<f64>,
    last_url: Option<String>,
    /// 🔒 Every request timed so far, in order.
    pub received: Arc<Mutex<Vec<TimedRequest>>>,
}

impl InMemoryTransferTimer {
    /// 🚀 A timer that reports `default_ms` for every transfer.
    pub fn new(default_ms: f64) -> Self {
        Self {
            default_ms,
            script: VecDeque::new(),
            last_url: None,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 📜 Durations to hand out first, in call order, before falling back to the default.
    pub fn with_script(mut self, script: impl IntoIterator<Item = f64>) -> Self {
        self.script = script.into_iter().collect();
        self
    }

    async fn record(&mut self, method: &'static str, url: &str, request: PutRequest) -> f64 {
        self.last_url = Some(url.to_string());
        self.received.lock().await.push(TimedRequest {
            method,
            url: url.to_string(),
            body_len: request.body.len(),
            headers: request.headers,
        });
        self.script.pop_front().unwrap_or(self.default_ms)
    }
}

#[async_trait]
impl TransferTimer for InMemoryTransferTimer {
    async fn time_get(&mut self, url: &str) -> f64 {
        self.record("GET", url, PutRequest::default()).await
    }

    async fn time_put(&mut self, url: &str, request: PutRequest) -> f64 {
        self.record("PUT", url, request).await
    }

    fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn the_one_where_the_script_runs_out_and_the_default_takes_over() {
        let mut timer = InMemoryTransferTimer::new(250.0).with_script([0.0, -1.0]);
        assert_eq!(timer.time_get("a").await, 0.0);
        assert_eq!(timer.time_get("b").await, -1.0);
        assert_eq!(timer.time_get("c").await, 250.0);
        assert_eq!(timer.last_url(), Some("c"));
    }

    #[tokio::test]
    async fn the_one_where_every_request_leaves_a_paper_trail() {
        let timer = InMemoryTransferTimer::new(1.0);
        let log = timer.received.clone();
        let mut timer = timer;

        timer.time_get("https://example.test/x").await;
        timer
            .time_put(
                "https://example.test/y",
                PutRequest {
                    body: vec![0; 3],
                    headers: vec![("Content-Type", "text/plain".into())],
                },
            )
            .await;

        let log = log.lock().await;
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].method, "GET");
        assert_eq!(log[1].method, "PUT");
        assert_eq!(log[1].body_len, 3);
        assert_eq!(log[1].headers, vec![("Content-Type", "text/plain".to_string())]);
    }
}
