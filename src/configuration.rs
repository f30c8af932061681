//! Extraction options.
//!
//! [`ExtractOptions`] is a builder that carries where and how frames are
//! written, plus the progress callback, so the extraction entry points keep
//! short signatures.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framegrab::{ExtractOptions, ProgressCallback, ProgressInfo, Resize};
//!
//! struct LogProgress;
//! impl ProgressCallback for LogProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{} of {} done", info.current, info.total);
//!     }
//! }
//!
//! let options = ExtractOptions::new()
//!     .with_output_dir("stills")
//!     .with_extension("png")
//!     .with_resize(Resize::Width(640))
//!     .with_progress(Arc::new(LogProgress));
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    sync::Arc,
};

use image::ImageFormat;

use crate::{
    error::FrameGrabError,
    progress::{NoOpProgress, ProgressCallback},
};

/// Default directory extracted frames are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "images";
/// Default output file extension.
pub const DEFAULT_EXTENSION: &str = "jpg";
/// Default file name prefix; files are named `<prefix>_<n>.<ext>`.
pub const DEFAULT_FILE_PREFIX: &str = "frame";
/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// How a decoded frame is scaled before it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resize {
    /// Keep the source resolution.
    #[default]
    Original,
    /// Scale to this width, keeping the aspect ratio.
    Width(u32),
    /// Scale to this height, keeping the aspect ratio.
    Height(u32),
    /// Scale to exactly this width and height.
    Exact(u32, u32),
}

impl Resize {
    /// Output dimensions for a frame of the given source size.
    ///
    /// Returns `None` when no scaling is needed.
    pub fn target_dimensions(self, source_width: u32, source_height: u32) -> Option<(u32, u32)> {
        let scaled = |numerator: u32, denominator: u32, value: u32| -> u32 {
            if denominator == 0 {
                return value;
            }
            ((value as f64 * numerator as f64 / denominator as f64).round() as u32).max(1)
        };

        let target = match self {
            Resize::Original => return None,
            Resize::Width(width) => (width, scaled(width, source_width, source_height)),
            Resize::Height(height) => (scaled(height, source_height, source_width), height),
            Resize::Exact(width, height) => (width, height),
        };

        (target != (source_width, source_height) && target.0 > 0 && target.1 > 0)
            .then_some(target)
    }
}

/// Options for an extraction run.
///
/// A default-constructed value writes `images/frame_<n>.jpg` at quality 95
/// with no progress reporting.
#[derive(Clone)]
pub struct ExtractOptions {
    pub(crate) output_dir: PathBuf,
    pub(crate) extension: String,
    pub(crate) file_prefix: String,
    pub(crate) jpeg_quality: u8,
    pub(crate) resize: Resize,
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// Fire the progress callback every N frames.
    pub(crate) batch_size: u64,
}

impl Debug for ExtractOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExtractOptions")
            .field("output_dir", &self.output_dir)
            .field("extension", &self.extension)
            .field("file_prefix", &self.file_prefix)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("resize", &self.resize)
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            resize: Resize::Original,
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
        }
    }

    /// Directory extracted frames are written to. Created if missing.
    #[must_use]
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Output file extension, which also selects the image encoder.
    ///
    /// A leading dot is ignored and the value is lowercased.
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_ascii_lowercase();
        self
    }

    /// File name prefix placed before the sequence index.
    #[must_use]
    pub fn with_file_prefix(mut self, prefix: &str) -> Self {
        self.file_prefix = prefix.to_string();
        self
    }

    /// JPEG quality, clamped to `1..=100`. Ignored for other formats.
    #[must_use]
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Scale frames before writing them.
    #[must_use]
    pub fn with_resize(mut self, resize: Resize) -> Self {
        self.resize = resize;
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Set how often the progress callback fires. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Directory frames are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output file extension, without the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// JPEG quality in `1..=100`.
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// Path of the output file for a 1-based sequence index.
    pub fn output_path(&self, index: u64) -> PathBuf {
        self.output_dir
            .join(format!("{}_{index}.{}", self.file_prefix, self.extension))
    }

    /// Image encoder selected by the extension.
    ///
    /// # Errors
    ///
    /// Returns [`FrameGrabError::UnsupportedImageFormat`] if the extension is
    /// unknown or its format cannot be written.
    pub fn image_format(&self) -> Result<ImageFormat, FrameGrabError> {
        ImageFormat::from_extension(&self.extension)
            .filter(|format| format.writing_enabled())
            .ok_or_else(|| FrameGrabError::UnsupportedImageFormat(self.extension.clone()))
    }
}
