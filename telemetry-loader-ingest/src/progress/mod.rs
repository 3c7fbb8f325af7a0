//! Textual progress reporting for chunked ingestion.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress indicator advanced once per submitted chunk.
pub struct IngestProgress {
    bar: ProgressBar,
}

impl IngestProgress {
    /// Start a bar sized to the total document count.
    pub fn start(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(ProgressStyle::default_bar());
        Self { bar }
    }

    /// Advance by a chunk's document count.
    pub fn advance(&self, count: u64) {
        self.bar.inc(count);
    }

    /// Stop the bar, leaving the final count visible.
    pub fn finish(&self) {
        self.bar.finish();
    }
}
