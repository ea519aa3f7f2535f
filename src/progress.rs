//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for an export run
#[derive(Debug)]
pub struct ProgressReporter {
    pub scan_pb: Option<ProgressBar>,
    pub export_pb: Option<ProgressBar>,
    show_progress: bool,
}

impl ProgressReporter {
    /// Create progress reporter for an interactive export
    pub fn new_for_export() -> Self {
        Self {
            scan_pb: None,
            export_pb: None,
            show_progress: true,
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            scan_pb: None,
            export_pb: None,
            show_progress: false,
        }
    }

    /// Show a spinner while commits are scanned
    pub fn start_scan(&mut self, commit_count: usize) {
        if self.show_progress && self.scan_pb.is_none() {
            self.scan_pb = Some(create_spinner(&format!(
                "Scanning {} commit(s)...",
                commit_count
            )));
        }
    }

    /// Finish commit scanning
    pub fn finish_scan(&mut self, message: &str) {
        if let Some(pb) = self.scan_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }

    /// Lazily create the file export bar
    pub fn start_export(&mut self, total: u64) {
        if self.show_progress && self.export_pb.is_none() && total > 0 {
            self.export_pb = Some(create_progress_bar(total, "Exporting"));
        }
    }

    /// Advance the export bar, naming the file about to be written
    pub fn update_export(&mut self, path: &str) {
        if let Some(pb) = &self.export_pb {
            pb.set_message(path.to_string());
            pb.inc(1);
        }
    }

    /// Finish file export
    pub fn finish_export(&mut self, message: &str) {
        if let Some(pb) = self.export_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // Bars left open by an aborted run are cleared silently
        if let Some(pb) = self.scan_pb.take() {
            pb.finish_and_clear();
        }
        if let Some(pb) = self.export_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner progress bar
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .expect("Invalid progress template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a progress bar with known total
fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>5}/{len:5} ({percent}%) {msg}")
            .expect("Invalid progress template")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
