//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinners for the load, compare and write stages of a run
#[derive(Debug)]
pub struct ProgressReporter {
    pub load_pb: Option<ProgressBar>,
    pub compare_pb: Option<ProgressBar>,
    pub write_pb: Option<ProgressBar>,
    show_progress: bool,
}

impl ProgressReporter {
    /// Create progress reporter for a compare run
    pub fn new_for_compare() -> Self {
        Self {
            load_pb: Some(create_spinner("Loading datasets...")),
            compare_pb: None,
            write_pb: None,
            show_progress: true,
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            load_pb: None,
            compare_pb: None,
            write_pb: None,
            show_progress: false,
        }
    }

    fn ensure_compare_pb(&mut self) {
        if self.show_progress && self.compare_pb.is_none() {
            self.compare_pb = Some(create_spinner("Aligning rows..."));
        }
    }

    fn ensure_write_pb(&mut self) {
        if self.show_progress && self.write_pb.is_none() {
            self.write_pb = Some(create_spinner("Writing outputs..."));
        }
    }

    /// Finish loading; clears the spinner so previews print cleanly
    pub fn finish_load(&mut self) {
        if let Some(pb) = self.load_pb.take() {
            pb.finish_and_clear();
        }
    }

    pub fn start_compare(&mut self) {
        self.finish_load();
        self.ensure_compare_pb();
    }

    pub fn finish_compare(&mut self, message: &str) {
        if let Some(pb) = self.compare_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }

    /// Show which artifact is being written
    pub fn update_write(&mut self, message: &str) {
        self.ensure_write_pb();
        if let Some(pb) = &self.write_pb {
            pb.set_message(message.to_string());
        }
    }

    pub fn finish_write(&mut self, message: &str) {
        if let Some(pb) = self.write_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        for pb in [
            self.load_pb.take(),
            self.compare_pb.take(),
            self.write_pb.take(),
        ]
        .into_iter()
        .flatten()
        {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner progress bar
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
