//! Per-frame pipeline driving lane geometry estimation end-to-end.
//!
//! The [`LaneDetector`] exposes a simple API: feed an RGB frame and get both
//! boundary fits, curvature and offset. Internally it coordinates feature
//! thresholding, perspective rectification, the pixel search (blind or
//! prior-guided depending on history state), quadratic fitting and the
//! real-world measurements, and it owns the fit history across frames.
//!
//! Typical usage:
//! ```no_run
//! use lane_detector::{LaneDetector, LaneParams};
//! use lane_detector::image::FrameRgb8;
//!
//! # fn example(frame: FrameRgb8) -> Result<(), lane_detector::LaneError> {
//! let mut detector = LaneDetector::new(LaneParams::default())?;
//! let lane = detector.process(&frame)?;
//! println!("offset: {:.2} m", lane.offset_m);
//! # Ok(())
//! # }
//! ```
//!
//! Frames must arrive in order: the guided search consults the fits pushed
//! by earlier frames. Run one detector per video stream.

use super::params::LaneParams;
use crate::error::LaneError;
use crate::fit::fit_quadratic;
use crate::history::FitHistory;
use crate::image::FrameRgb8;
use crate::measure::{measure_curvature, measure_vehicle_offset};
use crate::perspective::PerspectiveRectifier;
use crate::search::{locate_lane_pixels, SearchMode};
use crate::threshold::binary_threshold;
use crate::types::{FitOrigin, LaneFrame, LaneSide, PolyFit};
use log::debug;

/// Lane detector orchestrating thresholding, rectification, pixel search,
/// fitting and measurement, with a bounded fit history smoothing the frames.
pub struct LaneDetector {
    params: LaneParams,
    rectifier: PerspectiveRectifier,
    history: FitHistory,
}

impl LaneDetector {
    /// Create a detector with the supplied parameters. Parameter validation
    /// and homography estimation happen here; `process` never fails on
    /// configuration.
    pub fn new(params: LaneParams) -> Result<Self, LaneError> {
        params.validate().map_err(LaneError::Config)?;
        let rectifier = PerspectiveRectifier::new(&params.perspective)?;
        let history = FitHistory::new(params.history_len);
        Ok(Self {
            params,
            rectifier,
            history,
        })
    }

    /// Number of fit pairs currently buffered in history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The fixed rectifier, for callers projecting overlays themselves.
    pub fn rectifier(&self) -> &PerspectiveRectifier {
        &self.rectifier
    }

    /// Estimate lane geometry for one frame.
    ///
    /// Errors only when a lane has insufficient evidence *and* no earlier
    /// frame ever produced a fit; after that, evidence dropouts degrade to a
    /// carried-forward smoothed fit instead of failing.
    pub fn process(&mut self, frame: &FrameRgb8) -> Result<LaneFrame, LaneError> {
        let (width, height) = (frame.w, frame.h);
        debug!("LaneDetector::process start w={width} h={height}");

        let mask = binary_threshold(frame, &self.params.thresholds);
        let warped = self.rectifier.rectify(&mask);

        let mode = match self.history.smoothed() {
            Some((left, right)) => SearchMode::Guided { left, right },
            None => SearchMode::Blind,
        };
        let pixels = locate_lane_pixels(&warped, &mode, &self.params.window);
        debug!(
            "LaneDetector::process pixels left={} right={}",
            pixels.left.len(),
            pixels.right.len()
        );

        let fits = fit_quadratic(&pixels.left, LaneSide::Left).and_then(|left| {
            fit_quadratic(&pixels.right, LaneSide::Right).map(|right| (left, right))
        });

        let (left_fit, right_fit, origin) = match fits {
            Ok((left, right)) => {
                self.history.push(left, right);
                (left, right, FitOrigin::Measured)
            }
            Err(err) => match self.history.smoothed() {
                Some((left, right)) => {
                    debug!("LaneDetector::process {err} -> carrying smoothed fit forward");
                    (left, right, FitOrigin::CarriedForward)
                }
                None => return Err(err),
            },
        };

        let frame_result = self.assemble(left_fit, right_fit, origin, warped, width, height);
        debug!(
            "LaneDetector::process done origin={:?} offset_m={:.3}",
            frame_result.origin, frame_result.offset_m
        );
        Ok(frame_result)
    }

    fn assemble(
        &self,
        left_fit: PolyFit,
        right_fit: PolyFit,
        origin: FitOrigin,
        rectified_mask: crate::image::MaskU8,
        width: usize,
        height: usize,
    ) -> LaneFrame {
        let left_x = left_fit.sample(height);
        let right_x = right_fit.sample(height);
        let curvature = measure_curvature(&left_x, &right_x, height, &self.params.scale);
        let offset_m = measure_vehicle_offset(&left_fit, &right_fit, width, height, &self.params.scale);
        LaneFrame {
            left_fit,
            right_fit,
            left_x,
            right_x,
            curvature,
            offset_m,
            origin,
            rectified_mask,
            inverse_homography: *self.rectifier.inverse(),
        }
    }
}
