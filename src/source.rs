//! The decoder seam used by the extraction loop.
//!
//! [`FrameSource`] is the minimal surface the extractor needs from a
//! decoder handle: how many frames there are, a way to position the
//! decoder, and a way to pull the next picture. [`VideoFile`](crate::VideoFile)
//! implements it on top of FFmpeg; [`EmptySource`] stands in for a file that
//! could not be opened.

use image::DynamicImage;

use crate::error::FrameGrabError;

/// A seekable source of decoded video frames.
pub trait FrameSource {
    /// Total number of frames the source reports. `0` when unknown or empty.
    fn frame_count(&self) -> u64;

    /// Position the decoder so that the next [`read_frame`](FrameSource::read_frame)
    /// returns the frame at `position` (zero-based).
    fn seek(&mut self, position: u64) -> Result<(), FrameGrabError>;

    /// Decode the frame at the current position and advance by one.
    fn read_frame(&mut self) -> Result<DynamicImage, FrameGrabError>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn frame_count(&self) -> u64 {
        (**self).frame_count()
    }

    fn seek(&mut self, position: u64) -> Result<(), FrameGrabError> {
        (**self).seek(position)
    }

    fn read_frame(&mut self) -> Result<DynamicImage, FrameGrabError> {
        (**self).read_frame()
    }
}

/// A source with no frames at all.
///
/// Used when a video cannot be opened: the extraction still runs, plans zero
/// positions and reports that nothing was extracted.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptySource;

impl FrameSource for EmptySource {
    fn frame_count(&self) -> u64 {
        0
    }

    fn seek(&mut self, position: u64) -> Result<(), FrameGrabError> {
        Err(FrameGrabError::FrameOutOfRange {
            position,
            total_frames: 0,
        })
    }

    fn read_frame(&mut self) -> Result<DynamicImage, FrameGrabError> {
        Err(FrameGrabError::EndOfStream(0))
    }
}
