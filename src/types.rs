use crate::image::MaskU8;
use nalgebra::Matrix3;
use serde::Serialize;

/// Which lane boundary a value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LaneSide {
    Left,
    Right,
}

/// Quadratic lane boundary in rectified pixel space: x = a·y² + b·y + c.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PolyFit {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl PolyFit {
    /// Boundary x-coordinate at row `y`.
    #[inline]
    pub fn eval(&self, y: f64) -> f64 {
        (self.a * y + self.b) * y + self.c
    }

    /// Dense x-coordinates sampled at every integer row in `0..height`.
    pub fn sample(&self, height: usize) -> Vec<f64> {
        (0..height).map(|y| self.eval(y as f64)).collect()
    }
}

/// Candidate lane pixels in rectified image space. `xs` and `ys` always have
/// equal length; the set may be empty when a frame carries no evidence.
#[derive(Clone, Debug, Default)]
pub struct PixelSet {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl PixelSet {
    #[inline]
    pub fn push(&mut self, x: f64, y: f64) {
        self.xs.push(x);
        self.ys.push(y);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// Curvature radius of each boundary in meters. A dead-straight boundary
/// reports `f64::INFINITY`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CurvatureResult {
    pub left_radius_m: f64,
    pub right_radius_m: f64,
}

/// Whether a frame's fit was measured from this frame's pixels or carried
/// forward from history after an evidence dropout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FitOrigin {
    Measured,
    CarriedForward,
}

/// Per-frame detector output.
///
/// `rectified_mask` and `inverse_homography` let a downstream consumer draw
/// overlays in bird's-eye space and re-project them onto the original frame.
/// All fields are independent; callers combine them however they like.
#[derive(Clone, Debug, Serialize)]
pub struct LaneFrame {
    pub left_fit: PolyFit,
    pub right_fit: PolyFit,
    /// Left boundary x at every row, `left_x.len() == frame height`.
    pub left_x: Vec<f64>,
    /// Right boundary x at every row.
    pub right_x: Vec<f64>,
    pub curvature: CurvatureResult,
    /// Signed lateral offset in meters; negative means the vehicle sits left
    /// of lane center.
    pub offset_m: f64,
    pub origin: FitOrigin,
    #[serde(skip)]
    pub rectified_mask: MaskU8,
    pub inverse_homography: Matrix3<f64>,
}
