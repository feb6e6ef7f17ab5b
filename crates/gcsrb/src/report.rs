//! 🍽️ Report — serving results on a plate. JSON for machines, a table for humans.
//!
//! The JSON form is a flat array of row objects, one per benchmark call, every value
//! a string. The table form is for people squinting at a terminal wondering why
//! São Paulo is slower than Santiago today.

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::ASCII_MARKDOWN};

use crate::measurement::BenchmarkResult;
use crate::registry::{FILE_SIZE_CLASSES, REGIONS};

/// 📦 `[{...}, {...}]` — compact, one line, ready to pipe.
pub fn to_json(results: &[BenchmarkResult]) -> Result<String> {
    serde_json::to_string(results)
        .context("💀 A list of strings refused to become JSON. That shouldn't be possible, and yet.")
}

/// 📦 Same thing, with indentation, for the humans who asked for `--log`.
pub fn to_json_pretty(results: &[BenchmarkResult]) -> Result<String> {
    serde_json::to_string_pretty(results).context("💀 Pretty JSON refused to be pretty.")
}

fn numeric(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// 🍽️ One row per result, numbers right-aligned.
pub fn to_table(results: &[BenchmarkResult]) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Bucket",
        "Location",
        "File",
        "Time (s)",
        "Size (bytes)",
        "Speed (B/s)",
        "Speed (MiB/s)",
    ]);
    for r in results {
        table.add_row(vec![
            Cell::new(&r.bucket_name),
            Cell::new(&r.location),
            Cell::new(&r.file_name),
            numeric(&r.time_taken),
            numeric(&r.file_size_bytes),
            numeric(&r.speed_bps),
            numeric(&r.speed_mibps),
        ]);
    }
    table.to_string()
}

/// 🗺️ The region registry, as a table.
pub fn regions_table() -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN);
    table.set_header(vec!["Region", "Location"]);
    for region in &REGIONS {
        table.add_row(vec![region.id, region.display_name]);
    }
    table.to_string()
}

/// 📏 The file-size classes, as a table.
pub fn sizes_table() -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN);
    table.set_header(vec!["File", "Bytes", "MiB"]);
    for class in &FILE_SIZE_CLASSES {
        table.add_row(vec![
            Cell::new(class.id),
            numeric(&class.bytes.to_string()),
            numeric(&class.mib.to_string()),
        ]);
    }
    table.to_string()
}
