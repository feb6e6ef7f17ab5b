//! 🔏 Signers — where upload benchmarks go to ask permission.
//!
//! An upload can't be timed until somebody hands us a place to PUT it. That
//! somebody is a small signing service living at `http://localhost:3000` (by
//! default), which answers `GET /{bucket}/{file}` with a bare, short-lived signed
//! URL. No envelope. No JSON. Just the URL, naked, in the body.
//!
//! 🧠 Knowledge graph:
//! - Pattern: trait → concrete impls (`HttpSignedUrlProvider`, `InMemorySignedUrlProvider`) → `SignerBackend` enum
//! - Unlike timers, failures here are REAL errors (`BenchmarkError::SignedUrl`).
//!   No URL means no PUT means nothing to time. A sentinel would be lying.
//!
//! 🦆 The duck has no signing authority. It keeps asking anyway.

use async_trait::async_trait;

use crate::error::BenchmarkError;

pub(crate) mod http;
pub(crate) mod in_mem;

pub use http::HttpSignedUrlProvider;
pub use in_mem::InMemorySignedUrlProvider;

/// 🔏 Issues a signed upload URL for one bucket/file pair.
#[async_trait]
pub trait SignedUrlProvider: std::fmt::Debug + Send + Sync {
    /// 📡 Returns the signed URL verbatim, or `BenchmarkError::SignedUrl` with the upstream description.
    async fn signed_url(&self, bucket_name: &str, file_name: &str) -> Result<String, BenchmarkError>;
}

/// 🎭 Real signing service or a stand-in. The runner does not care which.
#[derive(Debug)]
pub enum SignerBackend {
    Http(HttpSignedUrlProvider),
    InMemory(InMemorySignedUrlProvider),
}

#[async_trait]
impl SignedUrlProvider for SignerBackend {
    async fn signed_url(&self, bucket_name: &str, file_name: &str) -> Result<String, BenchmarkError> {
        match self {
            SignerBackend::Http(s) => s.signed_url(bucket_name, file_name).await,
            SignerBackend::InMemory(s) => s.signed_url(bucket_name, file_name).await,
        }
    }
}
