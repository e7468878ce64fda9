// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Progress reporting while resources are listed
//!
//! Draws a spinner on stderr. indicatif hides it automatically when stderr is
//! not a terminal, so piped output stays clean.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner with consistent styling
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg} {elapsed:.dim}")
    {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Spinner that follows the listing of several resource kinds
pub struct FetchProgress {
    bar: ProgressBar,
    total: usize,
    done: usize,
}

impl FetchProgress {
    pub fn new(context: &str, total: usize) -> Self {
        Self {
            bar: create_spinner(&format!("Connecting to {}...", context)),
            total,
            done: 0,
        }
    }

    /// A hidden reporter, for machine-readable output formats
    pub fn hidden(total: usize) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            total,
            done: 0,
        }
    }

    pub fn fetching(&self, resource: &str) {
        self.bar.set_message(format!(
            "[{}/{}] Listing {}...",
            self.done + 1,
            self.total,
            resource
        ));
    }

    pub fn fetched(&mut self, resource: &str, matched: usize, total: usize) {
        self.done += 1;
        self.bar.set_message(format!(
            "[{}/{}] {}: {} of {} matched",
            self.done, self.total, resource, matched, total
        ));
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
