//! Error types for the `framegrab` crate.
//!
//! This module defines [`FrameGrabError`], the error type returned by every
//! fallible operation in the crate. Most variants describe a single frame or
//! a single input; only [`FrameGrabError::OutputDirectory`] is meant to end a
//! whole extraction run.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framegrab` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrameGrabError {
    /// The video file could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoFile::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A requested frame count of zero.
    #[error("Frame count must be at least 1 (got {0})")]
    InvalidFrameCount(u64),

    /// A seek target at or beyond the end of the video.
    #[error("Frame {position} is out of range (video has {total_frames} frames)")]
    FrameOutOfRange {
        /// The zero-based position that was requested.
        position: u64,
        /// The total number of frames in the video.
        total_frames: u64,
    },

    /// The decoder ran out of frames before reaching the seek target.
    #[error("End of stream reached before frame {0}")]
    EndOfStream(u64),

    /// A video frame could not be decoded.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// The output file extension has no matching image encoder.
    #[error("Unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    OutputDirectory {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: IoError,
    },

    /// Interactive input ended before a valid answer was given.
    #[error("Input closed before a valid answer was given")]
    InputClosed,

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while converting or encoding a frame.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    /// The video directory pattern could not be built.
    #[error("Invalid video directory pattern: {0}")]
    CatalogPattern(String),
}

impl From<FfmpegError> for FrameGrabError {
    fn from(error: FfmpegError) -> Self {
        FrameGrabError::FfmpegError(error.to_string())
    }
}
