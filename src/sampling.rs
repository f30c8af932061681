//! Frame position selection.
//!
//! A [`SamplingPlan`] turns a video's total frame count and a requested
//! number of stills into a list of zero-based frame positions spread across
//! the video. The arithmetic is plain integer division:
//!
//! - one requested frame uses the whole video as its interval, so only
//!   position `0` is produced;
//! - otherwise the interval is `total_frames / (requested_count - 1)`,
//!   truncated;
//! - positions are `0, interval, 2 * interval, …` while below
//!   `total_frames`, capped at `requested_count` entries.
//!
//! Because the last multiple of the interval is usually `total_frames`
//! itself, a plan often holds one position fewer than requested. A video
//! with 100 frames sampled 5 times yields `[0, 25, 50, 75]`.
//!
//! # Example
//!
//! ```
//! use framegrab::SamplingPlan;
//!
//! let plan = SamplingPlan::new(10, 3);
//! assert_eq!(plan.interval(), 5);
//! assert_eq!(plan.positions(), &[0, 5]);
//! ```

/// The frame positions chosen for one extraction request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct SamplingPlan {
    total_frames: u64,
    requested_count: u64,
    interval: u64,
    positions: Vec<u64>,
}

impl SamplingPlan {
    /// Compute the plan for a video of `total_frames` frames.
    ///
    /// `requested_count` is expected to be at least 1; a value of 0 yields an
    /// empty plan.
    pub fn new(total_frames: u64, requested_count: u64) -> Self {
        let interval = sampling_interval(total_frames, requested_count);

        let positions: Vec<u64> = if total_frames == 0 || requested_count == 0 {
            Vec::new()
        } else if interval == 0 {
            // Fewer frames than gaps: the step collapses, keep the first frame only.
            vec![0]
        } else {
            (0..total_frames)
                .step_by(interval as usize)
                .take(requested_count as usize)
                .collect()
        };

        log::debug!(
            "Sampling plan: total_frames={total_frames}, requested={requested_count}, interval={interval}, positions={}",
            positions.len(),
        );

        Self {
            total_frames,
            requested_count,
            interval,
            positions,
        }
    }

    /// Total number of frames the plan was computed for.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Number of frames that were asked for.
    pub fn requested_count(&self) -> u64 {
        self.requested_count
    }

    /// Distance between consecutive positions.
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Zero-based frame positions, strictly increasing, all below
    /// [`total_frames`](SamplingPlan::total_frames).
    pub fn positions(&self) -> &[u64] {
        &self.positions
    }

    /// Number of positions in the plan.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// `true` when no frame will be attempted.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// How many requested frames the plan cannot deliver.
    pub fn shortfall(&self) -> u64 {
        self.requested_count
            .saturating_sub(self.positions.len() as u64)
    }
}

/// Interval between sampled positions, before any clamping.
///
/// `requested_count == 1` uses the whole video; otherwise
/// `total_frames / (requested_count - 1)` with floor division.
pub fn sampling_interval(total_frames: u64, requested_count: u64) -> u64 {
    if requested_count > 1 {
        total_frames / (requested_count - 1)
    } else {
        total_frames
    }
}
