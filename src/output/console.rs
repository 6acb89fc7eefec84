//! Console status lines and progress tracking

use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

pub fn print_info(msg: &str) {
    eprintln!("{} {}", "[INFO]".cyan().bold(), msg);
}

/// End-of-run line: records in, candidates out
pub fn print_summary(endpoints: usize, urls: usize, destination: &str) {
    print_info(&format!(
        "{} endpoints -> {} urls ({})",
        endpoints.to_string().bold(),
        urls.to_string().green().bold(),
        destination
    ));
}

/// Progress over permuted records, with a running count of generated URLs
#[derive(Clone)]
pub struct ProgressTracker {
    bar: ProgressBar,
    found: Arc<AtomicU64>,
}

impl ProgressTracker {
    pub fn new(total: u64, hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
            bar.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
            );
            bar
        };

        Self {
            bar,
            found: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn hidden() -> Self {
        Self::new(0, true)
    }

    /// One record permuted
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// `n` candidates generated
    pub fn inc_found(&self, n: u64) {
        let found = self.found.fetch_add(n, Ordering::Relaxed) + n;
        self.bar.set_message(format!("| urls: {}", found));
    }

    pub fn found(&self) -> u64 {
        self.found.load(Ordering::Relaxed)
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
