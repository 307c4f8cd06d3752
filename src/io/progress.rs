//! Step progress display for scene compositing

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static STEP_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks progress through the structural steps of a scene
pub struct ProgressManager {
    bar: Option<ProgressBar>,
    completed: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no active bar
    pub const fn new() -> Self {
        Self {
            bar: None,
            completed: 0,
        }
    }

    /// Start a bar for the given number of steps
    pub fn initialize(&mut self, step_count: usize) {
        let bar = ProgressBar::new(step_count as u64);
        bar.set_style(STEP_STYLE.clone());
        self.bar = Some(bar);
        self.completed = 0;
    }

    /// Mark one step as done
    pub fn complete_step(&mut self, label: &str) {
        self.completed += 1;
        if let Some(ref bar) = self.bar {
            bar.set_message(label.to_string());
            bar.inc(1);
        }
    }

    /// Number of steps marked done since the last initialization
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Clean up the progress display
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_with_message("Scene composited");
        }
    }
}
