//! FFmpeg-backed video decoding.
//!
//! [`VideoFile`] owns an opened demuxer, a decoder for the best video stream
//! and an RGB24 scaler. It implements [`FrameSource`] so the extraction loop
//! can seek to a frame position and read the picture found there. Dropping a
//! `VideoFile` releases every FFmpeg resource it holds.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    Error as FfmpegError, Packet, Rational,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
    util::log::Level,
};
use image::{DynamicImage, RgbImage};
use log::LevelFilter;

use crate::{
    error::FrameGrabError, metadata::VideoMetadata, source::FrameSource, utilities,
};

/// An opened video file, ready for seeking and decoding.
///
/// # Example
///
/// ```no_run
/// use framegrab::{FrameSource, VideoFile};
///
/// let mut video = VideoFile::open("video/input.mp4")?;
/// video.seek(120)?;
/// let frame = video.read_frame()?;
/// frame.save("frame_120.jpg")?;
/// # Ok::<(), framegrab::FrameGrabError>(())
/// ```
pub struct VideoFile {
    input_context: Input,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    video_stream_index: usize,
    time_base: Rational,
    /// Stream start time in stream time base units.
    start_pts: i64,
    metadata: VideoMetadata,
    /// Frame number the next `read_frame` call should return.
    next_frame: u64,
    /// End of input has been sent to the decoder since the last seek.
    draining: bool,
    file_path: PathBuf,
}

impl Debug for VideoFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoFile")
            .field("file_path", &self.file_path)
            .field("video_stream_index", &self.video_stream_index)
            .field("metadata", &self.metadata)
            .field("next_frame", &self.next_frame)
            .finish_non_exhaustive()
    }
}

impl VideoFile {
    /// Open a video file for frame extraction.
    ///
    /// Initializes FFmpeg (idempotent), opens the container, selects the best
    /// video stream and caches its metadata.
    ///
    /// # Errors
    ///
    /// - [`FrameGrabError::FileOpen`] if the file cannot be opened or its
    ///   decoder cannot be created.
    /// - [`FrameGrabError::NoVideoStream`] if the file has no video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FrameGrabError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();
        let open_error = |reason: String| FrameGrabError::FileOpen {
            path: file_path.clone(),
            reason,
        };

        log::debug!("Opening video file: {}", file_path.display());

        ffmpeg_next::init()
            .map_err(|error| open_error(format!("FFmpeg initialisation failed: {error}")))?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| open_error(error.to_string()))?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(FrameGrabError::NoVideoStream)?;
        let video_stream_index = stream.index();
        let time_base = stream.time_base();
        let start_pts = match stream.start_time() {
            i64::MIN => 0,
            start => start,
        };

        let decoder_context = CodecContext::from_parameters(stream.parameters())
            .map_err(|error| open_error(format!("Failed to read codec parameters: {error}")))?;
        let decoder = decoder_context
            .decoder()
            .video()
            .map_err(|error| open_error(format!("Failed to create video decoder: {error}")))?;

        let frames_per_second = rational_to_f64(stream.avg_frame_rate())
            .or_else(|| rational_to_f64(stream.rate()))
            .unwrap_or(0.0);

        let duration = if input_context.duration() > 0 {
            Duration::from_micros(input_context.duration() as u64)
        } else if stream.duration() > 0 {
            Duration::from_secs_f64(utilities::pts_to_seconds(stream.duration(), time_base))
        } else {
            Duration::ZERO
        };

        let frame_count = match stream.frames() {
            declared if declared > 0 => declared as u64,
            _ => utilities::estimate_frame_count(duration, frames_per_second),
        };

        let width = decoder.width();
        let height = decoder.height();
        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )
        .map_err(|error| open_error(format!("Failed to create RGB scaler: {error}")))?;

        let metadata = VideoMetadata {
            width,
            height,
            frames_per_second,
            frame_count,
            codec,
            duration,
        };

        log::info!(
            "Opened video file: {} ({}x{}, {:.2} fps, codec={}, {} frames)",
            file_path.display(),
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.codec,
            metadata.frame_count,
        );

        Ok(Self {
            input_context,
            decoder,
            scaler,
            video_stream_index,
            time_base,
            start_pts,
            metadata,
            next_frame: 0,
            draining: false,
            file_path,
        })
    }

    /// Cached metadata of the video stream.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// Path the file was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read packets until one belongs to the video stream. `None` at end of file.
    fn next_video_packet(&mut self) -> Result<Option<Packet>, FrameGrabError> {
        loop {
            let mut packet = Packet::empty();
            match packet.read(&mut self.input_context) {
                Ok(()) if packet.stream() == self.video_stream_index => return Ok(Some(packet)),
                Ok(()) => {}
                Err(FfmpegError::Eof) => return Ok(None),
                Err(error) => log::debug!("Skipping unreadable packet: {error}"),
            }
        }
    }

    fn frame_number_of(&self, decoded: &VideoFrame) -> Option<u64> {
        let pts = decoded.timestamp().or_else(|| decoded.pts())?;
        Some(utilities::pts_to_frame_number(
            pts - self.start_pts,
            self.time_base,
            self.metadata.frames_per_second,
        ))
    }

    fn convert(&mut self, decoded: &VideoFrame) -> Result<DynamicImage, FrameGrabError> {
        let mut rgb_frame = VideoFrame::empty();
        self.scaler.run(decoded, &mut rgb_frame)?;

        let (width, height) = (self.metadata.width, self.metadata.height);
        let buffer = utilities::frame_to_rgb_buffer(&rgb_frame, width, height);
        let rgb_image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            FrameGrabError::VideoDecodeError(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })?;
        Ok(DynamicImage::ImageRgb8(rgb_image))
    }
}

impl FrameSource for VideoFile {
    fn frame_count(&self) -> u64 {
        self.metadata.frame_count
    }

    /// Seek to the nearest keyframe at or before `position` and arm the
    /// decoder to skip forward to it.
    fn seek(&mut self, position: u64) -> Result<(), FrameGrabError> {
        let total_frames = self.metadata.frame_count;
        if position >= total_frames {
            return Err(FrameGrabError::FrameOutOfRange {
                position,
                total_frames,
            });
        }

        let start_offset =
            (utilities::pts_to_seconds(self.start_pts, self.time_base) * 1_000_000.0) as i64;
        let timestamp = start_offset
            + utilities::frame_number_to_seek_timestamp(
                position,
                self.metadata.frames_per_second,
            );

        log::debug!("Seeking to frame {position} (timestamp={timestamp}us)");

        self.input_context.seek(timestamp, ..timestamp)?;
        self.decoder.flush();
        self.next_frame = position;
        self.draining = false;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<DynamicImage, FrameGrabError> {
        let target = self.next_frame;
        let mut decoded = VideoFrame::empty();

        loop {
            while self.decoder.receive_frame(&mut decoded).is_ok() {
                let reached = self
                    .frame_number_of(&decoded)
                    .is_none_or(|frame_number| frame_number >= target);
                if reached {
                    self.next_frame = target + 1;
                    return self.convert(&decoded);
                }
            }

            if self.draining {
                return Err(FrameGrabError::EndOfStream(target));
            }

            match self.next_video_packet()? {
                Some(packet) => {
                    // A corrupt packet only loses its own frame.
                    if let Err(error) = self.decoder.send_packet(&packet) {
                        log::debug!("Decoder rejected packet: {error}");
                    }
                }
                None => {
                    self.decoder.send_eof()?;
                    self.draining = true;
                }
            }
        }
    }
}

impl Drop for VideoFile {
    fn drop(&mut self) {
        log::debug!("Released video file: {}", self.file_path.display());
    }
}

/// Match FFmpeg's own console output to the Rust log filter.
///
/// FFmpeg is kept one notch quieter than the Rust side, so the default `warn`
/// filter only lets decoder errors through.
///
/// # Example
///
/// ```no_run
/// framegrab::sync_decoder_log_level(log::LevelFilter::Warn);
/// ```
pub fn sync_decoder_log_level(filter: LevelFilter) {
    let level = match filter {
        LevelFilter::Off => Level::Quiet,
        LevelFilter::Error => Level::Fatal,
        LevelFilter::Warn => Level::Error,
        LevelFilter::Info => Level::Warning,
        LevelFilter::Debug => Level::Verbose,
        LevelFilter::Trace => Level::Debug,
    };
    ffmpeg_next::util::log::set_level(level);
}

fn rational_to_f64(rate: Rational) -> Option<f64> {
    (rate.numerator() > 0 && rate.denominator() > 0)
        .then(|| rate.numerator() as f64 / rate.denominator() as f64)
}
