// AI
//! 📊 progress.rs — "Are we there yet?" — every batch, every region, forever.
//!
//! 🚀 A batch walks 34 regions one at a time. Some answer in a blink, some are on
//! the other side of an ocean. This module draws a bar so the human knows we're
//! not dead, and shows the last region's speed so they know roughly how alive.
//!
//! ⚠️ Watching this progress bar will not make Sydney any closer.
//! 🦆 The duck has nothing to do with this module. It's just vibing.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::measurement::BenchmarkResult;

/// 📊 Tracks one sequential batch: how many regions are done, and how the last one went.
pub(crate) struct BatchProgress {
    /// 🏷️ e.g. "download 2mib.txt"
    label: String,
    /// 🎨 hidden when progress is disabled, so callers never have to branch
    progress_bar: ProgressBar,
}

impl std::fmt::Debug for BatchProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // -- 🎭 ProgressBar is a diva and doesn't derive Debug
        f.debug_struct("BatchProgress")
            .field("label", &self.label)
            .field("position", &self.progress_bar.position())
            .finish()
    }
}

impl BatchProgress {
    /// 🚀 A bar of `total_regions` steps. `visible = false` gives a bar that draws nothing.
    pub(crate) fn new(label: String, total_regions: u64, visible: bool) -> Self {
        let progress_bar = if visible {
            ProgressBar::new(total_regions)
        } else {
            ProgressBar::hidden()
        };
        // -- 🐛 the template is a literal; if it ever fails to parse, fall back to the plain bar
        let style = ProgressStyle::default_bar()
            .template("{msg}\n| [{bar:40.cyan/blue}] {pos}/{len} regions, {elapsed_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        progress_bar.set_style(style);
        if visible {
            // -- ⏱️ keep the elapsed clock ticking while a slow region hogs the wire
            progress_bar.enable_steady_tick(Duration::from_millis(250));
        }
        progress_bar.set_message(format!("{label}: starting"));

        Self {
            label,
            progress_bar,
        }
    }

    /// 🔄 One region finished. Advance the bar and show what happened.
    pub(crate) fn region_done(&self, result: &BenchmarkResult) {
        self.progress_bar.inc(1);
        self.progress_bar.set_message(format!(
            "{}: {} ({}) {} s, {} MiB/s",
            self.label, result.bucket_name, result.location, result.time_taken, result.speed_mibps
        ));
    }

    /// 🔍 Regions completed so far.
    pub(crate) fn position(&self) -> u64 {
        self.progress_bar.position()
    }

    /// ✅ Done. Ring the bell. Clear the line.
    pub(crate) fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}
