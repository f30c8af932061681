//! Progress reporting.
//!
//! The extraction loop reports every processed frame, whether it was saved or
//! failed, through a [`ProgressCallback`]. Callbacks observe the run; they
//! cannot stop it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framegrab::{ExtractOptions, ExtractionResult, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(ExtractionResult::Failed { index, .. }) = &info.latest {
//!             eprintln!("frame {index} failed");
//!         }
//!     }
//! }
//!
//! let options = ExtractOptions::new().with_progress(Arc::new(PrintProgress));
//! ```

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::extractor::ExtractionResult;

/// A snapshot of extraction progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Frames processed so far, saved or failed.
    pub current: u64,
    /// Frames the run will attempt (the length of the sampling plan).
    pub total: u64,
    /// Frames saved so far.
    pub saved: u64,
    /// Frames that failed so far.
    pub failed: u64,
    /// Completion percentage (0.0 – 100.0). `None` for an empty run.
    pub percentage: Option<f32>,
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
    /// Estimated time remaining, based on throughput so far.
    pub estimated_remaining: Option<Duration>,
    /// Outcome of the most recently processed frame. `None` in the final
    /// report.
    pub latest: Option<ExtractionResult>,
}

/// Receives progress updates during extraction.
///
/// Implementations must be [`Send`] and [`Sync`] so a single callback can be
/// shared across runs.
pub trait ProgressCallback: Send + Sync {
    /// Called after every `batch_size` frames and once when the run ends.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all notifications. Used when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Tracks counters and timing and forwards snapshots to the callback.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    total: u64,
    current: u64,
    saved: u64,
    failed: u64,
    batch_size: u64,
    start_time: Instant,
    items_since_last_report: u64,
}

impl ProgressTracker {
    pub(crate) fn new(callback: Arc<dyn ProgressCallback>, total: u64, batch_size: u64) -> Self {
        Self {
            callback,
            total,
            current: 0,
            saved: 0,
            failed: 0,
            batch_size: batch_size.max(1),
            start_time: Instant::now(),
            items_since_last_report: 0,
        }
    }

    /// Record one processed frame and report if the batch is full.
    pub(crate) fn advance(&mut self, result: &ExtractionResult) {
        self.current += 1;
        match result {
            ExtractionResult::Saved { .. } => self.saved += 1,
            ExtractionResult::Failed { .. } => self.failed += 1,
        }

        self.items_since_last_report += 1;
        if self.items_since_last_report >= self.batch_size {
            self.report(Some(result.clone()));
            self.items_since_last_report = 0;
        }
    }

    /// Emit the closing report.
    pub(crate) fn finish(&mut self) {
        self.report(None);
    }

    fn report(&self, latest: Option<ExtractionResult>) {
        let elapsed = self.start_time.elapsed();

        let percentage =
            (self.total > 0).then(|| (self.current as f32 / self.total as f32) * 100.0);

        let estimated_remaining = (self.current > 0).then(|| {
            let remaining = self.total.saturating_sub(self.current);
            elapsed.div_f64(self.current as f64).mul_f64(remaining as f64)
        });

        let info = ProgressInfo {
            current: self.current,
            total: self.total,
            saved: self.saved,
            failed: self.failed,
            percentage,
            elapsed,
            estimated_remaining,
            latest,
        };

        self.callback.on_progress(&info);
    }
}
