//! # framegrab
//!
//! Grab a chosen number of still frames, evenly spaced by frame index, from a
//! video file and write them as numbered images.
//!
//! Decoding is powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate; images are
//! written with [`image`](https://crates.io/crates/image).
//!
//! ## Quick Start
//!
//! ```no_run
//! use framegrab::{ExtractOptions, SamplingRequest};
//!
//! let request = SamplingRequest::new("video/input.mp4", 5)?;
//! let report = framegrab::extract_from_path(&request, &ExtractOptions::new())?;
//! for path in report.saved_paths() {
//!     println!("wrote {}", path.display());
//! }
//! # Ok::<(), framegrab::FrameGrabError>(())
//! ```
//!
//! ## How frames are chosen
//!
//! The interval between frames is `total_frames / (count - 1)` (floor
//! division, or the whole video when one frame is asked for). Positions
//! `0, interval, 2 * interval, …` below `total_frames` are taken, at most
//! `count` of them. See [`SamplingPlan`].
//!
//! Files are named by their 1-based place in that sequence
//! (`images/frame_1.jpg`, `images/frame_2.jpg`, …), not by frame position.
//! Existing files with the same name are overwritten.
//!
//! ## Failure model
//!
//! - A video that cannot be opened is treated as having zero frames.
//! - A frame that cannot be decoded or written is reported and skipped.
//! - Only an output directory that cannot be created stops the run.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod catalog;
pub mod configuration;
pub mod error;
pub mod extractor;
pub mod metadata;
pub mod progress;
pub mod prompt;
pub mod sampling;
pub mod source;
mod utilities;
pub mod video;

pub use catalog::list_videos;
pub use configuration::{ExtractOptions, Resize};
pub use error::FrameGrabError;
pub use extractor::{
    ExtractionReport, ExtractionResult, SamplingRequest, extract_frames, extract_from_path,
};
pub use metadata::VideoMetadata;
pub use progress::{ProgressCallback, ProgressInfo};
pub use sampling::{SamplingPlan, sampling_interval};
pub use source::{EmptySource, FrameSource};
pub use video::{VideoFile, sync_decoder_log_level};
