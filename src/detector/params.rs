//! Parameter types configuring the detector stages.
//!
//! Groups the knobs for thresholding, perspective rectification, the
//! sliding-window/guided search, real-world scaling and the fit history.
//! Defaults match a 1280×720 dash-cam view with standard US lane widths.
//! For tuning, start with the threshold ranges and the perspective quads.

use crate::measure::ScaleParams;
use crate::perspective::PerspectiveQuads;
use crate::search::WindowParams;
use crate::threshold::ThresholdParams;
use serde::{Deserialize, Serialize};

/// Detector-wide parameters. Static per detector instance; construct a new
/// detector to change them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneParams {
    /// Feature extraction threshold ranges.
    pub thresholds: ThresholdParams,
    /// Perspective source/destination quads.
    pub perspective: PerspectiveQuads,
    /// Sliding-window and guided-band geometry.
    pub window: WindowParams,
    /// Meters-per-pixel scale of the rectified view.
    pub scale: ScaleParams,
    /// Number of recent fits kept per lane and averaged into the tracking
    /// prior.
    pub history_len: usize,
}

impl Default for LaneParams {
    fn default() -> Self {
        Self {
            thresholds: ThresholdParams::default(),
            perspective: PerspectiveQuads::default(),
            window: WindowParams::default(),
            scale: ScaleParams::default(),
            history_len: 10,
        }
    }
}

impl LaneParams {
    /// Configuration-time validation; per-frame processing assumes these
    /// hold and never re-checks them.
    pub fn validate(&self) -> Result<(), String> {
        let t = &self.thresholds;
        for (name, min, max) in [
            ("sobel", t.sobel_min, t.sobel_max),
            ("white", t.white_min, t.white_max),
            ("saturation", t.saturation_min, t.saturation_max),
            ("hue", t.hue_min, t.hue_max),
        ] {
            if min > max {
                return Err(format!("{name} threshold range is inverted ({min} > {max})"));
            }
        }
        if self.window.nwindows == 0 {
            return Err("nwindows must be positive".into());
        }
        if self.window.margin == 0 {
            return Err("margin must be positive".into());
        }
        if self.history_len == 0 {
            return Err("history_len must be positive".into());
        }
        if self.scale.ym_per_pix <= 0.0 || self.scale.xm_per_pix <= 0.0 {
            return Err("meters-per-pixel scales must be positive".into());
        }
        Ok(())
    }
}
