mod common;

use common::synthetic_image::{blank_road_rgb, synthetic_road_rgb};
use lane_detector::image::FrameRgb8;
use lane_detector::{FitOrigin, LaneDetector, LaneError, LaneParams};

fn view(w: usize, h: usize, data: &[u8]) -> FrameRgb8<'_> {
    FrameRgb8 {
        w,
        h,
        stride: 3 * w,
        data,
    }
}

#[test]
fn synthetic_road_is_detected_and_tracked() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (w, h) = (1280usize, 720usize);
    let rgb = synthetic_road_rgb(w, h);

    let mut detector = LaneDetector::new(LaneParams::default()).expect("detector");
    let first = detector.process(&view(w, h, &rgb)).expect("first frame");
    assert_eq!(first.origin, FitOrigin::Measured);
    assert!(
        (first.left_fit.c - 300.0).abs() < 25.0,
        "left c = {}",
        first.left_fit.c
    );
    assert!(
        (first.right_fit.c - 980.0).abs() < 25.0,
        "right c = {}",
        first.right_fit.c
    );
    // The painted lane is straight and centered under the camera.
    assert!(first.curvature.left_radius_m > 500.0);
    assert!(first.curvature.right_radius_m > 500.0);
    assert!(first.offset_m.abs() < 0.3, "offset = {}", first.offset_m);
    assert_eq!(first.left_x.len(), h);
    assert_eq!(first.right_x.len(), h);

    // Subsequent frames run the guided search off the history.
    for _ in 0..11 {
        let lane = detector.process(&view(w, h, &rgb)).expect("tracked frame");
        assert_eq!(lane.origin, FitOrigin::Measured);
    }
    // History is bounded at the configured length.
    assert_eq!(detector.history_len(), 10);
}

#[test]
fn evidence_dropout_carries_the_smoothed_fit_forward() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (w, h) = (1280usize, 720usize);
    let road = synthetic_road_rgb(w, h);
    let blank = blank_road_rgb(w, h);

    let mut detector = LaneDetector::new(LaneParams::default()).expect("detector");
    let first = detector.process(&view(w, h, &road)).expect("first frame");

    let dropout = detector.process(&view(w, h, &blank)).expect("dropout frame");
    assert_eq!(dropout.origin, FitOrigin::CarriedForward);
    assert_eq!(dropout.left_fit, first.left_fit);
    assert_eq!(dropout.right_fit, first.right_fit);
    // Carried-forward frames do not grow the history.
    assert_eq!(detector.history_len(), 1);
}

#[test]
fn first_frame_without_evidence_surfaces_the_error() {
    let (w, h) = (1280usize, 720usize);
    let blank = blank_road_rgb(w, h);
    let mut detector = LaneDetector::new(LaneParams::default()).expect("detector");
    match detector.process(&view(w, h, &blank)) {
        Err(LaneError::InsufficientLaneEvidence { points, .. }) => assert!(points < 3),
        other => panic!("expected insufficient evidence, got {other:?}"),
    }
}

#[test]
fn invalid_configuration_is_rejected_at_construction() {
    let params = LaneParams {
        history_len: 0,
        ..Default::default()
    };
    assert!(matches!(
        LaneDetector::new(params),
        Err(LaneError::Config(_))
    ));
}
