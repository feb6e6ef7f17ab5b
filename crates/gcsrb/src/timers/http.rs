//! 📡 The real stopwatch: one reqwest call, one `Instant`, one number.
//!
//! INT. NETWORK STACK — SOMEWHERE BETWEEN HERE AND OREGON.
//! A GET leaves the building. 2 MiB come back, chunk by chunk, and we count
//! every one of them before we stop the clock, because "first byte" is not
//! "download finished" no matter how much the optimists in the room want it to be.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, trace, warn};

use crate::app_config::HttpConfig;
use crate::timers::{FAILED_TRANSFER_MS, PutRequest, TransferTimer};

/// 📡 Times transfers over real HTTP.
///
/// Holds one `reqwest::Client` for its whole life, because building a client
/// per request is the networking equivalent of buying a new car for every grocery run.
#[derive(Debug)]
pub struct HttpTransferTimer {
    client: reqwest::Client,
    last_url: Option<String>,
}

impl HttpTransferTimer {
    /// 🚀 Build the client. Timeouts only apply when configured; otherwise the client's
    /// defaults decide how long a hung bucket gets to hang.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .context("💀 The HTTP client refused to be born. Probably the TLS stack. It usually is.")?;
        Ok(Self {
            client,
            last_url: None,
        })
    }

    /// 🚰 Pull the whole body through and count it. Non-2xx is an error here,
    /// same as a refused connection. The caller turns both into the sentinel.
    async fn drain(response: reqwest::Response) -> reqwest::Result<u64> {
        let mut response = response.error_for_status()?;
        let mut total = 0u64;
        while let Some(chunk) = response.chunk().await? {
            total += chunk.len() as u64;
        }
        Ok(total)
    }

    async fn get(&self, url: &str) -> reqwest::Result<u64> {
        let response = self.client.get(url).send().await?;
        Self::drain(response).await
    }

    async fn put(&self, url: &str, request: PutRequest) -> reqwest::Result<u64> {
        let mut builder = self.client.put(url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        let response = builder.body(request.body).send().await?;
        Self::drain(response).await
    }

    /// ⏱️ Shared bookkeeping for both verbs: stop the clock or hand back the sentinel.
    fn settle(verb: &str, url: &str, started: Instant, outcome: reqwest::Result<u64>) -> f64 {
        match outcome {
            Ok(bytes) => {
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                debug!("⏱️ {} {} moved {} bytes in {:.3} ms", verb, url, bytes, elapsed_ms);
                elapsed_ms
            }
            Err(err) => {
                // ⚠️ swallowed on purpose, the batch goes on. The row will look wrong; that's the signal.
                warn!("💀 {} {} failed, recording sentinel duration: {}", verb, url, err);
                FAILED_TRANSFER_MS
            }
        }
    }
}

#[async_trait]
impl TransferTimer for HttpTransferTimer {
    async fn time_get(&mut self, url: &str) -> f64 {
        self.last_url = Some(url.to_string());
        trace!("📥 timing GET {}", url);
        let started = Instant::now();
        let outcome = self.get(url).await;
        Self::settle("GET", url, started, outcome)
    }

    async fn time_put(&mut self, url: &str, request: PutRequest) -> f64 {
        self.last_url = Some(url.to_string());
        trace!("📤 timing PUT {} ({} bytes)", url, request.body.len());
        let started = Instant::now();
        let outcome = self.put(url, request).await;
        Self::settle("PUT", url, started, outcome)
    }

    fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }
}
