//! Internal utility functions.
//!
//! Frame-number and timestamp conversions for seeking, plus the row copy
//! that strips FFmpeg's line padding from decoded pictures.

use std::time::Duration;

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Copy an RGB24 plane into a tightly-packed buffer.
///
/// FFmpeg rows are often padded (stride > width × 3); the result can be
/// handed straight to [`image::RgbImage::from_raw`].
pub(crate) fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_length = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == row_length {
        return data[..row_length * (height as usize)].to_vec();
    }

    data.chunks(stride)
        .take(height as usize)
        .flat_map(|row| &row[..row_length])
        .copied()
        .collect()
}

/// Seconds represented by `pts` in the given time base.
pub fn pts_to_seconds(pts: i64, time_base: Rational) -> f64 {
    pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64
}

/// Frame number of a decoded picture, rounded to the nearest frame.
///
/// Rounding absorbs the small timestamp jitter of containers whose time base
/// is not an exact multiple of the frame duration.
pub fn pts_to_frame_number(pts: i64, time_base: Rational, frames_per_second: f64) -> u64 {
    let seconds = pts_to_seconds(pts, time_base);
    (seconds * frames_per_second).round().max(0.0) as u64
}

/// Seek timestamp in AV_TIME_BASE (microseconds) for a frame number.
///
/// Container-level seeks (`stream_index = -1`) take microseconds regardless
/// of the stream time base.
pub fn frame_number_to_seek_timestamp(frame_number: u64, frames_per_second: f64) -> i64 {
    if frames_per_second <= 0.0 {
        return 0;
    }
    let seconds = frame_number as f64 / frames_per_second;
    (seconds * 1_000_000.0) as i64
}

/// Estimated frame count for a stream of the given duration and rate.
pub fn estimate_frame_count(duration: Duration, frames_per_second: f64) -> u64 {
    if frames_per_second > 0.0 {
        (duration.as_secs_f64() * frames_per_second) as u64
    } else {
        0
    }
}
