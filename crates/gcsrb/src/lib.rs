//! 🌍 gcsrb — how fast can bytes get to Oregon, and back?
//!
//! Times single downloads from and uploads to storage buckets spread across every
//! supported region, and turns the durations into throughput rows.
//!
//! 🧠 Knowledge graph:
//! - `registry`: regions and file-size classes (immutable statics)
//! - `timers`: one GET or PUT, timed; failures become the `-1` sentinel
//! - `signers`: signed upload URLs from the signing service
//! - `measurement`: ms → s → speeds → `BenchmarkResult`
//! - `runner`: the validate → target → (sign) → time → normalize pipeline
//! - `report`: JSON and table output
//! - `app_config`: figment-layered configuration

pub mod app_config;
pub mod error;
pub mod measurement;
mod progress;
pub mod registry;
pub mod report;
pub mod runner;
pub mod signers;
pub mod timers;

use anyhow::{Context, Result};

pub use app_config::AppConfig;
pub use error::BenchmarkError;
pub use measurement::BenchmarkResult;
pub use runner::{BenchmarkRunner, Direction};

/// 🎯 What the caller wants measured: a direction, a file, and one region or all of them.
#[derive(Debug, Clone)]
pub struct BenchmarkPlan {
    pub direction: Direction,
    pub file_name: String,
    /// `None` walks every region in registry order.
    pub region: Option<String>,
}

/// 🚀 Build the production runner from config and carry out the plan.
pub async fn run(app_config: AppConfig, plan: BenchmarkPlan) -> Result<Vec<BenchmarkResult>> {
    let mut runner = BenchmarkRunner::from_config(&app_config)
        .context("💀 Couldn't wire up the benchmark runner from the loaded config.")?;

    match plan.region {
        Some(region) => {
            let result = runner
                .benchmark_single(plan.direction, &plan.file_name, &region)
                .await
                .with_context(|| {
                    format!(
                        "💀 The {} benchmark of '{}' in '{}' didn't happen.",
                        plan.direction, plan.file_name, region
                    )
                })?;
            Ok(vec![result])
        }
        None => runner
            .benchmark_all(plan.direction, &plan.file_name)
            .await
            .with_context(|| {
                format!(
                    "💀 The all-regions {} benchmark of '{}' stopped early.",
                    plan.direction, plan.file_name
                )
            }),
    }
}
