//! 📡 Asks the signing service for an upload URL over plain HTTP.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use crate::app_config::{HttpConfig, SignerConfig};
use crate::error::BenchmarkError;
use crate::signers::SignedUrlProvider;

#[derive(Debug)]
pub struct HttpSignedUrlProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSignedUrlProvider {
    /// 🚀 One client, reused for every signing request in the run.
    pub fn new(config: &SignerConfig, http: &HttpConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = http.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = http.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .context("💀 Couldn't build the HTTP client for the signing service.")?;
        Ok(Self {
            client,
            // -- 🔧 trailing-slash hygiene: `http://host:3000/` + `/bucket` is one slash too many
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// 🔗 `GET {base}/{bucket}/{file}` — the whole protocol, in one line.
    pub fn request_url(&self, bucket_name: &str, file_name: &str) -> String {
        format!("{}/{}/{}", self.base_url, bucket_name, file_name)
    }

    async fn fetch(&self, url: &str) -> reqwest::Result<String> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl SignedUrlProvider for HttpSignedUrlProvider {
    async fn signed_url(&self, bucket_name: &str, file_name: &str) -> Result<String, BenchmarkError> {
        let url = self.request_url(bucket_name, file_name);
        debug!("🔏 asking {} for a signed upload URL", url);
        self.fetch(&url)
            .await
            .map_err(|err| BenchmarkError::SignedUrl(err.to_string()))
    }
}
