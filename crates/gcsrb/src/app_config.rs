//! 🔧 App Configuration — the sacred TOML-to-struct pipeline.
//!
//! 📡 "Config not found: We looked everywhere. Under the couch. Behind the fridge.
//! In the junk drawer. Nothing." — every developer at 3am 🦆
//!
//! 🏗️ Powered by Figment, because manually parsing env vars is a form of
//! self-harm that even the borrow checker wouldn't approve of.
//!
//! 🧠 Knowledge graph:
//! - `[storage]`: where the buckets live and how their names are spelled
//! - `[signer]`: where upload benchmarks beg for a signed URL
//! - `[http]`: optional timeouts; unset means the HTTP client's own defaults decide
//! - `[runtime]`: knobs for the run itself (progress bar on/off)
//! - Every section has defaults, so zero config is a valid config.

use anyhow::Context;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// 📦 One struct to rule them all. Every field defaulted, nothing required.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub signer: SignerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// 🪣 The object store and its bucket naming scheme.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// 📡 Scheme + host of the public storage endpoint. No trailing path.
    #[serde(default = "default_storage_host")]
    pub host: String,
    /// 🏷️ Prepended to the region id to name the download bucket.
    #[serde(default = "default_download_bucket_prefix")]
    pub download_bucket_prefix: String,
    /// 🏷️ Prepended to the region id to name the upload bucket.
    #[serde(default = "default_upload_bucket_prefix")]
    pub upload_bucket_prefix: String,
}

fn default_storage_host() -> String {
    "https://storage.googleapis.com".to_string()
}

fn default_download_bucket_prefix() -> String {
    "gcsrbpa-".to_string()
}

fn default_upload_bucket_prefix() -> String {
    "gcsrbpa-upload-".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            host: default_storage_host(),
            download_bucket_prefix: default_download_bucket_prefix(),
            upload_bucket_prefix: default_upload_bucket_prefix(),
        }
    }
}

/// 🔏 The signing service that hands out upload URLs.
#[derive(Debug, Deserialize, Clone)]
pub struct SignerConfig {
    #[serde(default = "default_signer_url")]
    pub url: String,
}

// 🏠 localhost:3000, the default address of every side project since the dawn of node
fn default_signer_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            url: default_signer_url(),
        }
    }
}

/// ⏱️ HTTP client knobs. `None` leaves the client's default behavior alone.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HttpConfig {
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// 🎛️ How the run behaves, as opposed to where it points.
#[derive(Debug, Deserialize, Clone)]
pub struct RuntimeConfig {
    /// 📊 Draw a progress bar during multi-region batches.
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

fn default_show_progress() -> bool {
    true
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            show_progress: default_show_progress(),
        }
    }
}

/// 🚀 Load the config — from a file, from env vars, or from the sheer power of defaults.
///
/// 🔧 Merges environment variables (`GCSRB_*`, nested keys split on `__`, e.g.
/// `GCSRB_SIGNER__URL`) with an optional TOML file. TOML wins on conflicts.
///   - `config_file_name` is None  → env vars + defaults only.
///   - `config_file_name` is Some  → env vars + TOML file, merged.
pub fn load_config(config_file_name: Option<&Path>) -> anyhow::Result<AppConfig> {
    info!(
        "🔧 Loading configuration: {:#?}",
        config_file_name.unwrap_or(Path::new(""))
    );

    let config = Figment::new().merge(Env::prefixed("GCSRB_").split("__"));

    let config = match config_file_name {
        Some(file_name) => config.merge(Toml::file(file_name)),
        None => config,
    };

    let context_msg = match config_file_name {
        Some(path) => format!(
            "💀 Failed to parse configuration from file '{}' and environment variables (GCSRB_*). \
             Check the section names: storage, signer, http, runtime.",
            path.display()
        ),
        None => "💀 Failed to parse configuration from environment variables (GCSRB_*). \
                 No file was provided — this one's all on the environment. Classic."
            .to_string(),
    };

    config.extract().context(context_msg)
}
