//! Error handling integration tests.
//!
//! These tests verify that meaningful errors are returned for various
//! failure conditions.

use std::path::Path;

use framegrab::{FrameGrabError, FrameSource, SamplingRequest, VideoFile};

#[test]
fn open_nonexistent_file() {
    let result = VideoFile::open("this_file_does_not_exist.mp4");
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("Failed to open video file"),
        "Error message should mention file open failure: {error_message}",
    );
}

#[test]
fn open_invalid_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    std::fs::write(&invalid_file_path, b"this is not a video file")
        .expect("Failed to write invalid file");

    let result = VideoFile::open(&invalid_file_path);
    assert!(result.is_err(), "Expected error for invalid video file");
}

#[test]
fn zero_frame_request_is_rejected() {
    match SamplingRequest::new("input.mp4", 0) {
        Err(FrameGrabError::InvalidFrameCount(0)) => {}
        other => panic!("Expected InvalidFrameCount, got {other:?}"),
    }
}

#[test]
fn output_directory_error_names_the_path() {
    let error = FrameGrabError::OutputDirectory {
        path: "images".into(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    let message = error.to_string();
    assert!(message.contains("images"), "{message}");
    assert!(message.contains("denied"), "{message}");
}

#[test]
fn seek_out_of_range() {
    let path = "tests/fixtures/sample_video.mp4";
    if !Path::new(path).exists() {
        return;
    }

    let mut video = VideoFile::open(path).expect("Failed to open test video");
    let total_frames = video.frame_count();
    let result = video.seek(total_frames);
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("out of range"),
        "Error message should mention out of range: {error_message}",
    );
}

#[test]
fn no_video_stream_error() {
    let path = "tests/fixtures/sample_audio_only.mp4";
    if !Path::new(path).exists() {
        return;
    }

    let result = VideoFile::open(path);
    assert!(matches!(result, Err(FrameGrabError::NoVideoStream)));
}
