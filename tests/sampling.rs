//! Sampling plan tests.
//!
//! Pure arithmetic; no fixtures required.

use framegrab::{SamplingPlan, sampling_interval};

// ── documented scenarios ───────────────────────────────────────────

#[test]
fn hundred_frames_five_requested() {
    let plan = SamplingPlan::new(100, 5);
    assert_eq!(plan.interval(), 25);
    assert_eq!(plan.positions(), &[0, 25, 50, 75]);
    assert_eq!(plan.shortfall(), 1);
}

#[test]
fn ten_frames_three_requested() {
    let plan = SamplingPlan::new(10, 3);
    assert_eq!(plan.interval(), 5);
    assert_eq!(plan.positions(), &[0, 5]);
}

#[test]
fn single_frame_request_takes_first_frame() {
    for total in [1, 2, 7, 100, 10_000] {
        let plan = SamplingPlan::new(total, 1);
        assert_eq!(plan.interval(), total);
        assert_eq!(plan.positions(), &[0], "total_frames={total}");
    }
}

#[test]
fn uneven_division_stops_short_of_last_frame() {
    // 101 / 4 = 25, so the last position is 100 = 4 * 25 and fits.
    let plan = SamplingPlan::new(101, 5);
    assert_eq!(plan.positions(), &[0, 25, 50, 75, 100]);

    // 103 / 4 = 25 as well; the final frame (102) is never reached.
    let plan = SamplingPlan::new(103, 5);
    assert_eq!(plan.positions(), &[0, 25, 50, 75, 100]);
    assert_ne!(*plan.positions().last().unwrap(), 102);
}

// ── boundaries ─────────────────────────────────────────────────────

#[test]
fn empty_video_has_no_positions() {
    for requested in [1, 2, 5, 1_000] {
        let plan = SamplingPlan::new(0, requested);
        assert!(plan.is_empty(), "requested={requested}");
        assert_eq!(plan.shortfall(), requested);
    }
}

#[test]
fn zero_interval_keeps_only_first_frame() {
    // 3 frames, 10 requested: 3 / 9 = 0.
    let plan = SamplingPlan::new(3, 10);
    assert_eq!(plan.interval(), 0);
    assert_eq!(plan.positions(), &[0]);
}

#[test]
fn zero_requested_is_empty() {
    assert!(SamplingPlan::new(100, 0).is_empty());
}

#[test]
fn interval_formula() {
    assert_eq!(sampling_interval(100, 1), 100);
    assert_eq!(sampling_interval(100, 2), 100);
    assert_eq!(sampling_interval(100, 5), 25);
    assert_eq!(sampling_interval(99, 5), 24);
    assert_eq!(sampling_interval(0, 5), 0);
}

// ── invariants over a grid ─────────────────────────────────────────

#[test]
fn positions_are_strictly_increasing_and_in_range() {
    for total in 0..200_u64 {
        for requested in 1..40_u64 {
            let plan = SamplingPlan::new(total, requested);
            let positions = plan.positions();

            assert!(positions.len() as u64 <= requested);
            assert!(positions.len() as u64 <= total);
            if total > 0 {
                assert_eq!(positions[0], 0, "total={total} requested={requested}");
            }
            assert!(positions.iter().all(|&position| position < total));
            assert!(
                positions.windows(2).all(|pair| pair[0] < pair[1]),
                "total={total} requested={requested} positions={positions:?}"
            );
        }
    }
}

#[test]
fn length_matches_ceiling_when_interval_is_positive() {
    for total in 1..300_u64 {
        for requested in 2..=total.min(60) + 1 {
            let plan = SamplingPlan::new(total, requested);
            let interval = plan.interval();
            assert!(interval > 0);
            let expected = total.div_ceil(interval).min(requested);
            assert_eq!(
                plan.len() as u64,
                expected,
                "total={total} requested={requested}"
            );
        }
    }
}

#[test]
fn plan_is_deterministic() {
    assert_eq!(SamplingPlan::new(12_345, 17), SamplingPlan::new(12_345, 17));
}
