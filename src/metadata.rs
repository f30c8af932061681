//! Video metadata.
//!
//! [`VideoMetadata`] is read once when a [`VideoFile`](crate::VideoFile) is
//! opened and cached for the lifetime of the handle.

use std::time::Duration;

/// Metadata for the video stream of an opened file.
///
/// # Example
///
/// ```no_run
/// use framegrab::VideoFile;
///
/// let video = VideoFile::open("video/input.mp4")?;
/// let metadata = video.metadata();
/// println!("{}x{}, {} frames", metadata.width, metadata.height, metadata.frame_count);
/// # Ok::<(), framegrab::FrameGrabError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Total number of frames. Taken from the container when it declares one,
    /// otherwise estimated from duration and frame rate.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
    /// Duration of the container.
    pub duration: Duration,
}
