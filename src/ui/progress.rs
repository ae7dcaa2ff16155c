//! Progress indicators with CI fallback

use super::context::UiContext;
use crate::error::RelscoutError;
use crate::probe::ScanObserver;
use crate::version::Version;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Plain-mode progress line interval, in candidates
const PLAIN_PROGRESS_EVERY: usize = 50;

/// Format bytes as human-readable size (e.g., "1.5 MB")
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Byte progress bar for a download; hidden when `visible` is false
pub fn byte_bar(visible: bool, label: &str, total: Option<u64>) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = match total {
        Some(len) => {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("  {spinner:.cyan} {prefix} {bar:24.cyan/dim} {bytes}/{total_bytes} {bytes_per_sec:.dim} {eta:.dim}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("━╸─"),
            );
            bar
        }
        None => {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner:.cyan} {prefix} {bytes} {bytes_per_sec:.dim}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar
        }
    };
    bar.set_prefix(label.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Candidate progress for a scan.
///
/// Draws an indicatif bar in interactive mode and prints a line every
/// `PLAIN_PROGRESS_EVERY` candidates otherwise.
pub struct ScanProgress {
    bar: Option<ProgressBar>,
    total: Option<u64>,
}

impl ScanProgress {
    pub fn new(ctx: &UiContext, total: Option<u64>) -> Self {
        let bar = ctx.use_fancy_output().then(|| {
            let bar = match total {
                Some(len) => ProgressBar::new(len),
                None => ProgressBar::new_spinner(),
            };
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("  {spinner:.cyan} {bar:30.cyan/dim} {pos}/{len} {msg:.dim}  {elapsed:.dim}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("━╸─"),
            );
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        });
        Self { bar, total }
    }

    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}

impl ScanObserver for ScanProgress {
    fn on_candidate(&self, index: usize, candidate: &str) {
        match self.bar {
            Some(ref bar) => {
                bar.set_position(index as u64 + 1);
                bar.set_message(candidate.to_string());
            }
            None if index % PLAIN_PROGRESS_EVERY == 0 => match self.total {
                Some(total) => println!("Progress: {}/{} ({})", index + 1, total, candidate),
                None => println!("Progress: {} ({})", index + 1, candidate),
            },
            None => {}
        }
    }

    fn on_found(&self, version: &Version, cached: bool) {
        if cached {
            return;
        }
        let line = format!("Found version: {}", version);
        match self.bar {
            Some(ref bar) => bar.println(format!("  {}", line)),
            None => println!("{}", line),
        }
    }

    fn on_probe_error(&self, candidate: &str, error: &RelscoutError) {
        let line = format!("Error checking {}: {}", candidate, error);
        match self.bar {
            Some(ref bar) => bar.println(format!("  {}", line)),
            None => eprintln!("{}", line),
        }
    }
}
