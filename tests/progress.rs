//! Progress reporting tests.

use std::sync::{Arc, Mutex};

use framegrab::{
    EmptySource, ExtractOptions, ExtractionResult, FrameGrabError, FrameSource, ProgressCallback,
    ProgressInfo, SamplingRequest,
};
use image::{DynamicImage, RgbImage};

struct RecordingProgress {
    infos: Mutex<Vec<ProgressInfo>>,
}

impl RecordingProgress {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            infos: Mutex::new(Vec::new()),
        })
    }

    fn snapshot(&self) -> Vec<ProgressInfo> {
        self.infos.lock().unwrap().clone()
    }
}

impl ProgressCallback for RecordingProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.infos.lock().unwrap().push(info.clone());
    }
}

/// Every frame decodes except odd positions.
struct OddFramesBroken {
    frames: u64,
    next: u64,
}

impl FrameSource for OddFramesBroken {
    fn frame_count(&self) -> u64 {
        self.frames
    }

    fn seek(&mut self, position: u64) -> Result<(), FrameGrabError> {
        self.next = position;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<DynamicImage, FrameGrabError> {
        if self.next % 2 == 1 {
            return Err(FrameGrabError::VideoDecodeError("odd frame".to_string()));
        }
        Ok(DynamicImage::ImageRgb8(RgbImage::new(2, 2)))
    }
}

#[test]
fn every_frame_is_reported_then_a_final_summary() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let recorder = RecordingProgress::new();

    // 9 frames, 4 requested: 9 / 3 = 3 → positions 0, 3, 6.
    let request = SamplingRequest::new("synthetic.mp4", 4).unwrap();
    let options = ExtractOptions::new()
        .with_output_dir(temporary_directory.path())
        .with_extension("png")
        .with_progress(recorder.clone());
    let report =
        framegrab::extract_frames(OddFramesBroken { frames: 9, next: 0 }, &request, &options)
            .unwrap();
    assert_eq!(report.results.len(), 3);

    let infos = recorder.snapshot();
    assert_eq!(infos.len(), 4);

    let outcomes: Vec<bool> = infos[..3]
        .iter()
        .map(|info| info.latest.as_ref().is_some_and(ExtractionResult::is_saved))
        .collect();
    assert_eq!(outcomes, vec![true, false, true]);

    for (number, info) in (1_u64..).zip(&infos[..3]) {
        assert_eq!(info.current, number);
        assert_eq!(info.total, 3);
    }

    let last = infos.last().unwrap();
    assert!(last.latest.is_none());
    assert_eq!(last.current, 3);
    assert_eq!(last.saved, 2);
    assert_eq!(last.failed, 1);
    assert_eq!(last.percentage, Some(100.0));
    assert_eq!(last.estimated_remaining, Some(std::time::Duration::ZERO));
}

#[test]
fn batch_size_thins_out_reports() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let recorder = RecordingProgress::new();

    // 100 frames, 5 requested → 4 positions; batches of 2 → 2 reports + final.
    let request = SamplingRequest::new("synthetic.mp4", 5).unwrap();
    let options = ExtractOptions::new()
        .with_output_dir(temporary_directory.path())
        .with_extension("png")
        .with_batch_size(2)
        .with_progress(recorder.clone());
    let _ = framegrab::extract_frames(OddFramesBroken { frames: 100, next: 0 }, &request, &options)
        .unwrap();

    let currents: Vec<u64> = recorder.snapshot().iter().map(|info| info.current).collect();
    assert_eq!(currents, vec![2, 4, 4]);
}

#[test]
fn empty_run_reports_once_without_percentage() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let recorder = RecordingProgress::new();

    let request = SamplingRequest::new("missing.mp4", 3).unwrap();
    let options = ExtractOptions::new()
        .with_output_dir(temporary_directory.path())
        .with_progress(recorder.clone());
    let _ = framegrab::extract_frames(EmptySource, &request, &options).unwrap();

    let infos = recorder.snapshot();
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].total, 0);
    assert_eq!(infos[0].percentage, None);
    assert_eq!(infos[0].estimated_remaining, None);
}
