// ai
//! 🏁 Runner — one benchmark, start to finish, in a straight line.
//!
//! 🎬 COLD OPEN — EXT. STARTING LINE — DAWN
//!
//! The runner checks the paperwork (is this a real file? a real region?), walks to
//! the right lane (builds the bucket name and URL), asks the signing booth for a
//! ticket if it's an upload, fires the gun, reads the stopwatch, and hands the
//! number to accounting. Then it goes home. It does not loop back. It does not retry.
//! It has a very simple life and it is at peace with that.
//!
//! 🧠 Knowledge graph:
//! - validate → construct target → (sign, uploads only) → time → normalize
//! - Validation errors are typed and raised before ANY network call.
//! - Timed-transfer failures come back from the timer as the `-1` sentinel; they
//!   never become errors here.
//! - Signed-URL failures DO become errors; without a target there's nothing to time.
//! - Batches walk `registry::REGIONS` in order, one region at a time, and log after each.
//!
//! 🦆 The duck is the starter pistol. Please do not point the duck at anyone.

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app_config::{AppConfig, StorageConfig};
use crate::error::BenchmarkError;
use crate::measurement::{BenchmarkResult, normalize};
use crate::progress::BatchProgress;
use crate::registry::{self, FileSizeClass, REGIONS};
use crate::signers::{HttpSignedUrlProvider, SignedUrlProvider, SignerBackend};
use crate::timers::{HttpTransferTimer, PutRequest, TimerBackend, TransferTimer};

/// 🔀 Which way the bytes flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Download,
    Upload,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Download => write!(f, "download"),
            Direction::Upload => write!(f, "upload"),
        }
    }
}

/// 🏁 Orchestrates benchmark calls against one storage setup.
///
/// Owns its timer and signer. Calls are `&mut self` and awaited to completion one at
/// a time; nothing here runs two transfers at once.
#[derive(Debug)]
pub struct BenchmarkRunner {
    storage: StorageConfig,
    timer: TimerBackend,
    signer: SignerBackend,
    show_progress: bool,
}

impl BenchmarkRunner {
    /// 🚀 Wire up a runner from parts. Progress display starts off.
    pub fn new(storage: StorageConfig, timer: TimerBackend, signer: SignerBackend) -> Self {
        Self {
            storage,
            timer,
            signer,
            show_progress: false,
        }
    }

    /// 📊 Draw a progress bar during batches.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// 🏗️ The production wiring: real HTTP timer, real signing service.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timer = TimerBackend::Http(HttpTransferTimer::new(&config.http)?);
        let signer = SignerBackend::Http(HttpSignedUrlProvider::new(&config.signer, &config.http)?);
        Ok(Self::new(config.storage.clone(), timer, signer).with_progress(config.runtime.show_progress))
    }

    /// 🔍 The timer, for callers that want to see which URL was actually hit.
    pub fn timer(&self) -> &TimerBackend {
        &self.timer
    }

    /// 🏷️ `gcsrbpa-<region>` with the default prefix.
    pub fn download_bucket_name(&self, region_id: &str) -> String {
        format!("{}{}", self.storage.download_bucket_prefix, region_id)
    }

    /// 🏷️ `gcsrbpa-upload-<region>` with the default prefix.
    pub fn upload_bucket_name(&self, region_id: &str) -> String {
        format!("{}{}", self.storage.upload_bucket_prefix, region_id)
    }

    /// 🔗 `https://storage.googleapis.com/gcsrbpa-<region>/<file>` with the defaults.
    pub fn download_url(&self, region_id: &str, file_id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.storage.host.trim_end_matches('/'),
            self.download_bucket_name(region_id),
            file_id
        )
    }

    /// 🔒 File first, then region. Absence from the registry becomes a typed error here.
    fn validate(file_id: &str, region_id: &str) -> Result<&'static FileSizeClass, BenchmarkError> {
        let class = Self::validate_file(file_id)?;
        if registry::region(region_id).is_none() {
            return Err(BenchmarkError::InvalidBucketName(region_id.to_string()));
        }
        Ok(class)
    }

    fn validate_file(file_id: &str) -> Result<&'static FileSizeClass, BenchmarkError> {
        registry::file_size_class(file_id)
            .ok_or_else(|| BenchmarkError::InvalidFileName(file_id.to_string()))
    }

    /// 📥 Time one public download of `file_id` from the region's download bucket.
    pub async fn benchmark_single_download(
        &mut self,
        file_id: &str,
        region_id: &str,
    ) -> Result<BenchmarkResult, BenchmarkError> {
        Self::validate(file_id, region_id)?;
        let url = self.download_url(region_id, file_id);
        debug!("📥 download target: {}", url);

        let elapsed_ms = self.timer.time_get(&url).await;
        Ok(normalize(region_id, file_id, elapsed_ms))
    }

    /// 📤 Get a signed URL, then time one PUT of the zero-filled payload.
    ///
    /// ⚠️ If signing fails, this errors and no PUT is attempted.
    pub async fn benchmark_single_upload(
        &mut self,
        file_id: &str,
        region_id: &str,
    ) -> Result<BenchmarkResult, BenchmarkError> {
        let class = Self::validate(file_id, region_id)?;
        let bucket_name = self.upload_bucket_name(region_id);

        let signed_url = self.signer.signed_url(&bucket_name, file_id).await?;
        debug!("📤 upload target for {}: signed URL acquired", bucket_name);

        let elapsed_ms = self.timer.time_put(&signed_url, upload_request(class)).await;
        Ok(normalize(region_id, file_id, elapsed_ms))
    }

    /// 🔀 One benchmark in whichever direction was asked for.
    pub async fn benchmark_single(
        &mut self,
        direction: Direction,
        file_id: &str,
        region_id: &str,
    ) -> Result<BenchmarkResult, BenchmarkError> {
        let result = match direction {
            Direction::Download => self.benchmark_single_download(file_id, region_id).await,
            Direction::Upload => self.benchmark_single_upload(file_id, region_id).await,
        }?;
        info!("✅ Completed {} benchmark for {}", direction, region_id);
        Ok(result)
    }

    /// 🌍 Every region, in registry order, one at a time.
    ///
    /// A region whose transfer fails still yields its (sentinel) row. A validation or
    /// signing error ends the batch and is returned.
    pub async fn benchmark_all(
        &mut self,
        direction: Direction,
        file_id: &str,
    ) -> Result<Vec<BenchmarkResult>, BenchmarkError> {
        Self::validate_file(file_id)?;
        info!("🚀 Beginning {} benchmarking for {}", direction, file_id);

        let progress = BatchProgress::new(
            format!("{direction} {file_id}"),
            REGIONS.len() as u64,
            self.show_progress,
        );
        let mut results = Vec::with_capacity(REGIONS.len());
        for region in &REGIONS {
            let result = match self.benchmark_single(direction, file_id, region.id).await {
                Ok(result) => result,
                Err(err) => {
                    progress.finish();
                    return Err(err);
                }
            };
            progress.region_done(&result);
            results.push(result);
        }
        progress.finish();
        Ok(results)
    }

    /// 📥🌍 `benchmark_all(Direction::Download, file_id)`.
    pub async fn benchmark_all_downloads(
        &mut self,
        file_id: &str,
    ) -> Result<Vec<BenchmarkResult>, BenchmarkError> {
        self.benchmark_all(Direction::Download, file_id).await
    }

    /// 📤🌍 `benchmark_all(Direction::Upload, file_id)`.
    pub async fn benchmark_all_uploads(
        &mut self,
        file_id: &str,
    ) -> Result<Vec<BenchmarkResult>, BenchmarkError> {
        self.benchmark_all(Direction::Upload, file_id).await
    }
}

/// 🧱 Body and headers for an upload of `class`: zeros, plain text, MD5, and an exact length range.
fn upload_request(class: &FileSizeClass) -> PutRequest {
    PutRequest {
        body: registry::upload_payload(class),
        headers: vec![
            ("Content-Type", "text/plain".to_string()),
            ("Content-Md5", class.content_md5.to_string()),
            (
                "x-goog-content-length-range",
                format!("{},{}", class.bytes, class.bytes),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signers::InMemorySignedUrlProvider;
    use crate::timers::{FAILED_TRANSFER_MS, InMemoryTransferTimer};

    const SIGNED: &str = "https://storage.googleapis.com/gcsrbpa-upload-us-west1/2mib.txt-deadbeef?X-Goog-Signature=abc";

    fn the_runner(timer: InMemoryTransferTimer, signer: InMemorySignedUrlProvider) -> BenchmarkRunner {
        BenchmarkRunner::new(
            StorageConfig::default(),
            TimerBackend::InMemory(timer),
            SignerBackend::InMemory(signer),
        )
    }

    #[test]
    fn the_one_where_the_download_url_is_byte_exact() {
        let runner = the_runner(InMemoryTransferTimer::new(0.0), InMemorySignedUrlProvider::signing(SIGNED));
        assert_eq!(
            runner.download_url("us-west1", "2mib.txt"),
            "https://storage.googleapis.com/gcsrbpa-us-west1/2mib.txt"
        );
        assert_eq!(runner.upload_bucket_name("us-west1"), "gcsrbpa-upload-us-west1");
    }

    #[tokio::test]
    async fn the_one_where_a_valid_pair_echoes_its_inputs() {
        let mut runner = the_runner(InMemoryTransferTimer::new(1000.0), InMemorySignedUrlProvider::signing(SIGNED));
        let result = runner
            .benchmark_single_download("64mib.txt", "asia-northeast2")
            .await
            .expect("💀 a valid pair should benchmark");

        assert_eq!(result.file_name, "64mib.txt");
        assert_eq!(result.bucket_name, "asia-northeast2");
        assert_eq!(result.location, "Osaka");
        assert_eq!(result.speed_mibps, "64.000");
        assert_eq!(
            runner.timer().last_url(),
            Some("https://storage.googleapis.com/gcsrbpa-asia-northeast2/64mib.txt")
        );
    }

    #[tokio::test]
    async fn the_one_where_a_bad_file_name_never_touches_the_network() {
        let timer = InMemoryTransferTimer::new(1000.0);
        let log = timer.received.clone();
        let mut runner = the_runner(timer, InMemorySignedUrlProvider::signing(SIGNED));

        let err = runner
            .benchmark_single_download("random_file_name", "us-west1")
            .await
            .expect_err("unknown file should be rejected");
        assert_eq!(err, BenchmarkError::InvalidFileName("random_file_name".into()));
        assert!(log.lock().await.is_empty());
    }

    #[tokio::test]
    async fn the_one_where_a_bad_region_never_touches_the_network() {
        let timer = InMemoryTransferTimer::new(1000.0);
        let log = timer.received.clone();
        let signer = InMemorySignedUrlProvider::signing(SIGNED);
        let signer_log = signer.received.clone();
        let mut runner = the_runner(timer, signer);

        let err = runner
            .benchmark_single_upload("2mib.txt", "random_bucket_name")
            .await
            .expect_err("unknown region should be rejected");
        assert_eq!(err, BenchmarkError::InvalidBucketName("random_bucket_name".into()));
        assert!(log.lock().await.is_empty());
        assert!(signer_log.lock().await.is_empty());
    }

    #[tokio::test]
    async fn the_one_where_the_file_gets_checked_before_the_region() {
        let mut runner = the_runner(InMemoryTransferTimer::new(1.0), InMemorySignedUrlProvider::signing(SIGNED));
        let err = runner
            .benchmark_single_download("random_file_name", "random_bucket_name")
            .await
            .expect_err("both bad, file wins");
        assert!(matches!(err, BenchmarkError::InvalidFileName(_)));
    }

    #[tokio::test]
    async fn the_one_where_the_sentinel_flows_all_the_way_to_the_row() {
        let mut runner = the_runner(
            InMemoryTransferTimer::new(FAILED_TRANSFER_MS),
            InMemorySignedUrlProvider::signing(SIGNED),
        );
        let result = runner
            .benchmark_single_download("2mib.txt", "us-west1")
            .await
            .expect("💀 transport failures are not errors");
        assert_eq!(result.time_taken, "-0.001");
        assert_eq!(result.speed_bps, "-2097152000.000");
        assert_eq!(result.speed_mibps, "-2000.000");
    }

    #[tokio::test]
    async fn the_one_where_a_zero_duration_goes_to_infinity() {
        let mut runner = the_runner(InMemoryTransferTimer::new(0.0), InMemorySignedUrlProvider::signing(SIGNED));
        let result = runner
            .benchmark_single_upload("2mib.txt", "us-west1")
            .await
            .expect("💀 zero is a duration, not a crime");
        assert_eq!(result.speed_bps, "Infinity");
        assert_eq!(result.speed_mibps, "Infinity");
    }

    #[tokio::test]
    async fn the_one_where_the_upload_asks_first_and_puts_second() {
        let timer = InMemoryTransferTimer::new(500.0);
        let log = timer.received.clone();
        let signer = InMemorySignedUrlProvider::signing(SIGNED);
        let signer_log = signer.received.clone();
        let mut runner = the_runner(timer, signer);

        let result = runner
            .benchmark_single_upload("2mib.txt", "us-west1")
            .await
            .expect("💀 a signed upload should benchmark");
        assert_eq!(result.location, "Oregon");
        assert_eq!(result.speed_mibps, "4.000");

        assert_eq!(
            signer_log.lock().await.as_slice(),
            &[("gcsrbpa-upload-us-west1".to_string(), "2mib.txt".to_string())]
        );
        let log = log.lock().await;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].method, "PUT");
        assert_eq!(log[0].url, SIGNED);
        assert_eq!(log[0].body_len, 2_097_152);
        assert_eq!(
            log[0].headers,
            vec![
                ("Content-Type", "text/plain".to_string()),
                ("Content-Md5", "stEjbChqPAcEIk/kEF7KSQ==".to_string()),
                ("x-goog-content-length-range", "2097152,2097152".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn the_one_where_no_signature_means_no_put() {
        let timer = InMemoryTransferTimer::new(500.0);
        let log = timer.received.clone();
        let mut runner = the_runner(timer, InMemorySignedUrlProvider::failing("connection refused"));

        let err = runner
            .benchmark_single_upload("2mib.txt", "us-west1")
            .await
            .expect_err("signing failure must be a hard error");
        assert_eq!(err, BenchmarkError::SignedUrl("connection refused".into()));
        assert!(log.lock().await.is_empty(), "a PUT was attempted without a signed URL");
    }

    #[tokio::test]
    async fn the_one_where_one_bad_region_does_not_spoil_the_batch() {
        // -- 📜 the fourth region (us-east1) fails, everyone else takes one second
        let timer = InMemoryTransferTimer::new(1000.0).with_script([1000.0, 1000.0, 1000.0, FAILED_TRANSFER_MS]);
        let log = timer.received.clone();
        let mut runner = the_runner(timer, InMemorySignedUrlProvider::signing(SIGNED));

        let results = runner
            .benchmark_all_downloads("2mib.txt")
            .await
            .expect("💀 the batch should survive a single failure");

        assert_eq!(results.len(), REGIONS.len());
        for (result, region) in results.iter().zip(REGIONS.iter()) {
            assert_eq!(result.bucket_name, region.id);
            assert_eq!(result.location, region.display_name);
        }
        assert_eq!(results[3].bucket_name, "us-east1");
        assert_eq!(results[3].time_taken, "-0.001");
        assert_eq!(results[2].time_taken, "1.000");
        assert_eq!(results[4].time_taken, "1.000");

        let log = log.lock().await;
        assert_eq!(log.len(), REGIONS.len());
        assert_eq!(log[0].url, "https://storage.googleapis.com/gcsrbpa-northamerica-northeast1/2mib.txt");
    }

    #[tokio::test]
    async fn the_one_where_a_bad_file_stops_the_batch_before_it_starts() {
        let timer = InMemoryTransferTimer::new(1000.0);
        let log = timer.received.clone();
        let mut runner = the_runner(timer, InMemorySignedUrlProvider::signing(SIGNED));

        let err = runner
            .benchmark_all(Direction::Upload, "random_file_name")
            .await
            .expect_err("unknown file should fail the batch");
        assert!(matches!(err, BenchmarkError::InvalidFileName(_)));
        assert!(log.lock().await.is_empty());
    }

    #[tokio::test]
    async fn the_one_where_the_signer_being_down_ends_the_upload_batch() {
        let timer = InMemoryTransferTimer::new(1000.0);
        let log = timer.received.clone();
        let signer = InMemorySignedUrlProvider::failing("connection refused");
        let signer_log = signer.received.clone();
        let mut runner = the_runner(timer, signer);

        let err = runner
            .benchmark_all_uploads("2mib.txt")
            .await
            .expect_err("no signer, no batch");
        assert!(matches!(err, BenchmarkError::SignedUrl(_)));
        assert_eq!(signer_log.lock().await.len(), 1);
        assert!(log.lock().await.is_empty());
    }

    #[test]
    fn the_one_where_directions_print_in_lowercase() {
        assert_eq!(Direction::Download.to_string(), "download");
        assert_eq!(Direction::Upload.to_string(), "upload");
    }
}
