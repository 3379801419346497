#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod error;
pub mod history;
pub mod image;
pub mod types;

// Stage-level modules – public for tools and tests, considered internals.
pub mod fit;
pub mod measure;
pub mod perspective;
pub mod search;
pub mod threshold;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + per-frame result.
pub use crate::detector::{LaneDetector, LaneParams};
pub use crate::error::LaneError;
pub use crate::types::{CurvatureResult, FitOrigin, LaneFrame, LaneSide, PolyFit};

// Homography helpers that are generally useful to overlay consumers.
pub use crate::perspective::{apply_homography_points, PerspectiveRectifier};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lane_detector::prelude::*;
///
/// # fn main() -> Result<(), lane_detector::LaneError> {
/// let (w, h) = (1280usize, 720usize);
/// let rgb = vec![0u8; w * h * 3];
/// let frame = FrameRgb8 { w, h, stride: 3 * w, data: &rgb };
///
/// let mut detector = LaneDetector::new(LaneParams::default())?;
/// match detector.process(&frame) {
///     Ok(lane) => println!("offset_m={:.2}", lane.offset_m),
///     Err(err) => println!("no lane: {err}"),
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{FrameRgb8, MaskU8};
    pub use crate::{LaneDetector, LaneFrame, LaneParams};
}
