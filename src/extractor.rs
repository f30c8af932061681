//! Evenly spaced frame extraction.
//!
//! [`extract_frames`] runs a [`SamplingRequest`] against any [`FrameSource`]:
//! it plans the frame positions, then for each one seeks, decodes and writes
//! an image named after its 1-based sequence index. A frame that cannot be
//! decoded or written is recorded as [`ExtractionResult::Failed`] and the loop
//! moves on; only an output directory that cannot be created ends the run.
//!
//! [`extract_from_path`] is the file-based entry point. It opens a
//! [`VideoFile`], falls back to an empty source when the file cannot be
//! opened, and releases the decoder before returning.
//!
//! # Example
//!
//! ```no_run
//! use framegrab::{ExtractOptions, SamplingRequest};
//!
//! let request = SamplingRequest::new("video/input.mp4", 5)?;
//! let report = framegrab::extract_from_path(&request, &ExtractOptions::new())?;
//! println!("saved {} of {} frames", report.saved(), request.requested_count());
//! # Ok::<(), framegrab::FrameGrabError>(())
//! ```

use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

use image::{DynamicImage, ImageFormat, codecs::jpeg::JpegEncoder, imageops::FilterType};

use crate::{
    configuration::ExtractOptions,
    error::FrameGrabError,
    progress::ProgressTracker,
    sampling::SamplingPlan,
    source::{EmptySource, FrameSource},
    video::VideoFile,
};

/// What to extract: a video and how many stills to take from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingRequest {
    video_path: PathBuf,
    requested_count: u64,
}

impl SamplingRequest {
    /// Create a request.
    ///
    /// # Errors
    ///
    /// Returns [`FrameGrabError::InvalidFrameCount`] if `requested_count` is 0.
    pub fn new<P: AsRef<Path>>(video_path: P, requested_count: u64) -> Result<Self, FrameGrabError> {
        if requested_count == 0 {
            return Err(FrameGrabError::InvalidFrameCount(requested_count));
        }
        Ok(Self {
            video_path: video_path.as_ref().to_path_buf(),
            requested_count,
        })
    }

    /// Path of the video to sample.
    pub fn video_path(&self) -> &Path {
        &self.video_path
    }

    /// Number of stills asked for.
    pub fn requested_count(&self) -> u64 {
        self.requested_count
    }

    /// Positions this request selects in a video of `total_frames` frames.
    pub fn plan(&self, total_frames: u64) -> SamplingPlan {
        SamplingPlan::new(total_frames, self.requested_count)
    }
}

/// Outcome of one sampled frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    /// The frame was decoded and written.
    Saved {
        /// 1-based sequence index, used in the file name.
        index: u64,
        /// Zero-based frame position in the video.
        position: u64,
        /// File the frame was written to.
        path: PathBuf,
    },
    /// The frame could not be decoded or written.
    Failed {
        /// 1-based sequence index.
        index: u64,
        /// Zero-based frame position in the video.
        position: u64,
        /// Why the frame was lost.
        reason: String,
    },
}

impl ExtractionResult {
    /// 1-based sequence index.
    pub fn index(&self) -> u64 {
        match self {
            ExtractionResult::Saved { index, .. } | ExtractionResult::Failed { index, .. } => *index,
        }
    }

    /// Zero-based frame position.
    pub fn position(&self) -> u64 {
        match self {
            ExtractionResult::Saved { position, .. }
            | ExtractionResult::Failed { position, .. } => *position,
        }
    }

    /// `true` for [`ExtractionResult::Saved`].
    pub fn is_saved(&self) -> bool {
        matches!(self, ExtractionResult::Saved { .. })
    }
}

/// Everything one extraction run did.
#[derive(Debug, Clone)]
#[must_use]
pub struct ExtractionReport {
    /// Video the run read from.
    pub video_path: PathBuf,
    /// Why the video could not be opened, if it could not.
    pub source_error: Option<String>,
    /// Positions that were attempted.
    pub plan: SamplingPlan,
    /// One entry per attempted position, in order.
    pub results: Vec<ExtractionResult>,
}

impl ExtractionReport {
    /// `false` when the video could not be opened and nothing was attempted.
    pub fn source_opened(&self) -> bool {
        self.source_error.is_none()
    }

    /// Number of frames written.
    pub fn saved(&self) -> usize {
        self.results.iter().filter(|result| result.is_saved()).count()
    }

    /// Number of frames lost.
    pub fn failed(&self) -> usize {
        self.results.len() - self.saved()
    }

    /// Files written, in sequence order.
    pub fn saved_paths(&self) -> Vec<&Path> {
        self.results
            .iter()
            .filter_map(|result| match result {
                ExtractionResult::Saved { path, .. } => Some(path.as_path()),
                ExtractionResult::Failed { .. } => None,
            })
            .collect()
    }
}

/// Open `request.video_path()` and extract from it.
///
/// A file that cannot be opened counts as a video with zero frames: the
/// output directory is still created and the report has no results and a
/// [`source_error`](ExtractionReport::source_error).
///
/// # Errors
///
/// Same as [`extract_frames`].
pub fn extract_from_path(
    request: &SamplingRequest,
    options: &ExtractOptions,
) -> Result<ExtractionReport, FrameGrabError> {
    match VideoFile::open(request.video_path()) {
        Ok(video) => extract_frames(video, request, options),
        Err(error) => {
            log::warn!(
                "Cannot open {}, treating it as empty: {error}",
                request.video_path().display()
            );
            let mut report = extract_frames(EmptySource, request, options)?;
            report.source_error = Some(error.to_string());
            Ok(report)
        }
    }
}

/// Extract the frames selected by `request` from `source`.
///
/// The source is consumed and dropped before this returns, on success and on
/// error alike. Pass `&mut source` to keep using it afterwards.
///
/// # Errors
///
/// - [`FrameGrabError::UnsupportedImageFormat`] if the configured extension
///   has no encoder. Checked before anything is written.
/// - [`FrameGrabError::OutputDirectory`] if the output directory cannot be
///   created.
///
/// Per-frame failures are not errors; they appear in the report.
pub fn extract_frames<S: FrameSource>(
    mut source: S,
    request: &SamplingRequest,
    options: &ExtractOptions,
) -> Result<ExtractionReport, FrameGrabError> {
    let format = options.image_format()?;

    let output_dir = options.output_dir();
    fs::create_dir_all(output_dir).map_err(|error| FrameGrabError::OutputDirectory {
        path: output_dir.to_path_buf(),
        source: error,
    })?;

    let plan = request.plan(source.frame_count());
    log::info!(
        "Extracting {} of {} requested frame(s) from {} (interval={})",
        plan.len(),
        request.requested_count(),
        request.video_path().display(),
        plan.interval(),
    );

    let mut tracker =
        ProgressTracker::new(options.progress.clone(), plan.len() as u64, options.batch_size);
    let mut results = Vec::with_capacity(plan.len());

    for (index, &position) in (1_u64..).zip(plan.positions()) {
        let path = options.output_path(index);
        let result = match grab_frame(&mut source, position, &path, format, options) {
            Ok(()) => {
                log::debug!("Saved frame {index} (position {position}) to {}", path.display());
                ExtractionResult::Saved {
                    index,
                    position,
                    path,
                }
            }
            Err(error) => {
                log::warn!("Failed to extract frame {index} (position {position}): {error}");
                ExtractionResult::Failed {
                    index,
                    position,
                    reason: error.to_string(),
                }
            }
        };
        tracker.advance(&result);
        results.push(result);
    }

    tracker.finish();
    drop(source);

    let report = ExtractionReport {
        video_path: request.video_path().to_path_buf(),
        source_error: None,
        plan,
        results,
    };
    log::info!(
        "Extraction finished: {} saved, {} failed",
        report.saved(),
        report.failed()
    );
    Ok(report)
}

fn grab_frame<S: FrameSource>(
    source: &mut S,
    position: u64,
    path: &Path,
    format: ImageFormat,
    options: &ExtractOptions,
) -> Result<(), FrameGrabError> {
    source.seek(position)?;
    let image = source.read_frame()?;

    let image = match options.resize.target_dimensions(image.width(), image.height()) {
        Some((width, height)) => image.resize_exact(width, height, FilterType::Triangle),
        None => image,
    };

    write_image(&image, path, format, options.jpeg_quality())
}

/// Write `image` to `path`, replacing any existing file.
///
/// The image is encoded in memory first, so an encoder error leaves no file
/// behind. A file only partly written is removed.
fn write_image(
    image: &DynamicImage,
    path: &Path,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<(), FrameGrabError> {
    let mut buffer = Vec::new();

    if format == ImageFormat::Jpeg {
        let encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality);
        match image {
            DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => {
                image.write_with_encoder(encoder)?
            }
            // JPEG has no alpha or high bit depth.
            other => DynamicImage::ImageRgb8(other.to_rgb8()).write_with_encoder(encoder)?,
        }
    } else {
        image.write_to(&mut Cursor::new(&mut buffer), format)?;
    }

    if let Err(error) = fs::write(path, &buffer) {
        if let Err(cleanup) = fs::remove_file(path) {
            log::debug!("Could not remove partial file {}: {cleanup}", path.display());
        }
        return Err(error.into());
    }
    Ok(())
}
