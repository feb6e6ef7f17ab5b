//! ⏱️ Timers — where a single HTTP request goes to get clocked.
//!
//! 🎭 This module is the stopwatch booth at the racetrack. One runner at a time.
//! One GET or one PUT, start the clock, stop the clock, write down the number.
//! If the runner trips over a malformed URL, a refused connection, or a 403,
//! we don't call an ambulance. We write down `-1` and wave the next one through.
//!
//! 🧠 Knowledge graph:
//! - Pattern: trait → concrete impls (`HttpTransferTimer`, `InMemoryTransferTimer`) → `TimerBackend` enum
//! - Output is milliseconds as `f64`. Non-negative on success, `FAILED_TRANSFER_MS` on any failure.
//! - Failures are swallowed on purpose: a batch of 34 regions must survive one bad region.
//! - Every timer remembers the URL it last hit, so callers can check URL construction
//!   without re-deriving it.
//!
//! 🦆 The duck holds the stopwatch. The duck has never once started it late.

use async_trait::async_trait;

pub(crate) mod http;
pub(crate) mod in_mem;

pub use http::HttpTransferTimer;
pub use in_mem::{InMemoryTransferTimer, TimedRequest};

/// 💀 The duration a failed transfer reports, in milliseconds.
pub const FAILED_TRANSFER_MS: f64 = -1.0;

/// 📤 Everything a timed PUT needs besides the URL: the body and its headers.
#[derive(Debug, Clone, Default)]
pub struct PutRequest {
    /// 🧱 The payload. Sent as-is, no length cap.
    pub body: Vec<u8>,
    /// 🏷️ Header name/value pairs, applied in order.
    pub headers: Vec<(&'static str, String)>,
}

/// ⏱️ Times exactly one network transfer against a fully-formed URL.
///
/// # Contract 📜
/// - Returns elapsed wall-clock milliseconds on success (`>= 0.0`).
/// - Returns `FAILED_TRANSFER_MS` on any failure. Never panics, never errors.
/// - Records the URL before issuing the request; `last_url` exposes it.
#[async_trait]
pub trait TransferTimer: std::fmt::Debug + Send {
    /// 📥 Time a GET, draining the response body.
    async fn time_get(&mut self, url: &str) -> f64;
    /// 📤 Time a PUT of `request.body` with `request.headers`.
    async fn time_put(&mut self, url: &str, request: PutRequest) -> f64;
    /// 🔍 The URL most recently handed to this timer, if any.
    fn last_url(&self) -> Option<&str>;
}

/// 🎭 The many faces of a stopwatch. Real network or canned numbers, the runner can't tell.
#[derive(Debug)]
pub enum TimerBackend {
    Http(HttpTransferTimer),
    InMemory(InMemoryTransferTimer),
}

#[async_trait]
impl TransferTimer for TimerBackend {
    async fn time_get(&mut self, url: &str) -> f64 {
        match self {
            TimerBackend::Http(t) => t.time_get(url).await,
            TimerBackend::InMemory(t) => t.time_get(url).await,
        }
    }

    async fn time_put(&mut self, url: &str, request: PutRequest) -> f64 {
        match self {
            TimerBackend::Http(t) => t.time_put(url, request).await,
            TimerBackend::InMemory(t) => t.time_put(url, request).await,
        }
    }

    fn last_url(&self) -> Option<&str> {
        match self {
            TimerBackend::Http(t) => t.last_url(),
            TimerBackend::InMemory(t) => t.last_url(),
        }
    }
}
