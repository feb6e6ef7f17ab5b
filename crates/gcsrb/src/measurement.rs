// ai
//! 📐 Measurement — milliseconds in, a tidy row of strings out.
//!
//! 🎬 COLD OPEN — INT. ACCOUNTING DEPARTMENT — END OF QUARTER
//!
//! The stopwatch comes back with `-1`. The intern panics. The accountant does not.
//! "Divide it by a thousand," she says. "Write down `-0.001`. Everyone downstream
//! will know what it means." The intern asks what happens when the stopwatch says
//! `0`. "Infinity," she says, not looking up. "Write the word. Spell it right."
//!
//! 🧠 Knowledge graph:
//! - `seconds_from_millis`: unchecked `/ 1000`. The `-1` sentinel becomes `-0.001`, on purpose.
//! - `throughput`: explicit branches, no falsy-coercion tricks:
//!     size unknown → `SENTINEL_SPEED` (`-1`)
//!     seconds exactly zero → `+∞`
//!     otherwise → `size / seconds` (negative when the transfer failed)
//! - `format_fixed`: three decimals, `Infinity` / `-Infinity` / `NaN` spelled out.
//! - `normalize`: assembles a `BenchmarkResult`. Unknown file ids fall back to the id
//!   itself as the "size"; unknown regions fall back to the raw id as the location.
//! - Every field of `BenchmarkResult` is a `String`. Every code path. No exceptions.
//!
//! 🦆 The duck checked the arithmetic. The duck is not an accountant. Trust the tests.

use serde::{Deserialize, Serialize};

use crate::registry;

/// 💀 Speed reported when the payload size is unknown.
pub const SENTINEL_SPEED: f64 = -1.0;

/// 🔢 Decimal places for every numeric field.
pub const FLOAT_ROUND_DIGITS: usize = 3;

/// 📦 One benchmark, one row. Built fresh per call, never touched again.
///
/// Serializes as `{ bucketName, location, fileName, timeTaken, fileSizeBytes, speedBps, speedMiBps }`
/// with string values throughout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    /// 🌍 The region id the caller asked for (not the prefixed bucket).
    pub bucket_name: String,
    /// 🏙️ Display name, or the raw region id when the registry drew a blank.
    pub location: String,
    pub file_name: String,
    /// ⏱️ Seconds, 3 decimals. `-0.001` means the transfer failed.
    pub time_taken: String,
    /// 📏 Byte count, or the file id itself when the size class is unknown.
    pub file_size_bytes: String,
    pub speed_bps: String,
    #[serde(rename = "speedMiBps")]
    pub speed_mibps: String,
}

/// ⏱️ ms → s. No guard, no clamp: `-1` comes out as `-0.001` and that's the point.
pub fn seconds_from_millis(elapsed_ms: f64) -> f64 {
    elapsed_ms / 1000.0
}

/// 🚀 `size / seconds`, with the two edge cases spelled out instead of coerced.
pub fn throughput(size: Option<u64>, seconds: f64) -> f64 {
    match size {
        None => SENTINEL_SPEED,
        // -- ⚡ faster than the clock can see. Not an error, just very fast.
        Some(_) if seconds == 0.0 => f64::INFINITY,
        Some(size) => size as f64 / seconds,
    }
}

/// 🔢 Fixed three-decimal text. Non-finite values get their names written out.
pub fn format_fixed(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        // -- 🧹 `-0.0` would print as "-0.000"; nobody wants a negative nothing
        let value = if value == 0.0 { 0.0 } else { value };
        format!("{:.*}", FLOAT_ROUND_DIGITS, value)
    }
}

/// 📐 Turn one raw duration into one finished row.
///
/// Lookups that miss don't fail here. Validation is the runner's job; this function
/// only decides what a missing size or location looks like on paper.
pub fn normalize(region_id: &str, file_id: &str, elapsed_ms: f64) -> BenchmarkResult {
    let seconds = seconds_from_millis(elapsed_ms);
    let class = registry::file_size_class(file_id);

    let file_size_bytes = match class {
        Some(class) => class.bytes.to_string(),
        None => file_id.to_string(),
    };
    let location = registry::region_display_name(region_id).unwrap_or(region_id);

    BenchmarkResult {
        bucket_name: region_id.to_string(),
        location: location.to_string(),
        file_name: file_id.to_string(),
        time_taken: format_fixed(seconds),
        file_size_bytes,
        speed_bps: format_fixed(throughput(class.map(|c| c.bytes), seconds)),
        speed_mibps: format_fixed(throughput(class.map(|c| c.mib), seconds)),
    }
}
