//! 🧪 A signing service that lives in RAM and answers the same way every time.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::BenchmarkError;
use crate::signers::SignedUrlProvider;

/// 🎭 Returns a fixed URL, or a fixed failure, and remembers who asked.
#[derive(Debug, Clone)]
pub struct InMemorySignedUrlProvider {
    answer: Result<String, String>,
    /// 🔒 `(bucket, file)` for every request received, in order.
    pub received: Arc<Mutex<Vec<(String, String)>>>,
}

impl InMemorySignedUrlProvider {
    /// ✅ Always signs, always with this URL.
    pub fn signing(url: impl Into<String>) -> Self {
        Self {
            answer: Ok(url.into()),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 💀 Never signs. `description` becomes the wrapped upstream error.
    pub fn failing(description: impl Into<String>) -> Self {
        Self {
            answer: Err(description.into()),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl SignedUrlProvider for InMemorySignedUrlProvider {
    async fn signed_url(&self, bucket_name: &str, file_name: &str) -> Result<String, BenchmarkError> {
        self.received
            .lock()
            .await
            .push((bucket_name.to_string(), file_name.to_string()));
        self.answer.clone().map_err(BenchmarkError::SignedUrl)
    }
}
