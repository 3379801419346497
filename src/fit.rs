//! Least-squares quadratic fitting of lane boundaries.
//!
//! Fits x as a function of y (rows are the well-conditioned axis for
//! near-vertical lane boundaries) by solving the degree-2 normal equations
//! with nalgebra. Each lane side is fitted independently.

use crate::error::LaneError;
use crate::types::{LaneSide, PixelSet, PolyFit};
use nalgebra::{Matrix3, Vector3};

/// Fit a quadratic x = f(y) to a lane's pixel set.
///
/// Fewer than 3 pixels cannot constrain a quadratic; a singular normal
/// matrix (e.g. all pixels on one row) is reported the same way since the
/// evidence is equally unusable.
pub fn fit_quadratic(pixels: &PixelSet, side: LaneSide) -> Result<PolyFit, LaneError> {
    let points = pixels.len();
    if points < 3 {
        return Err(LaneError::InsufficientLaneEvidence { side, points });
    }
    fit_pairs(&pixels.ys, &pixels.xs)
        .ok_or(LaneError::InsufficientLaneEvidence { side, points })
}

/// Degree-2 least squares over (y, x) pairs via the normal equations.
pub(crate) fn fit_pairs(ys: &[f64], xs: &[f64]) -> Option<PolyFit> {
    debug_assert_eq!(ys.len(), xs.len());
    let mut s = [0.0f64; 5]; // sums of y^0 .. y^4
    let mut t = [0.0f64; 3]; // sums of x·y^0 .. x·y^2
    for (&y, &x) in ys.iter().zip(xs) {
        let y2 = y * y;
        s[0] += 1.0;
        s[1] += y;
        s[2] += y2;
        s[3] += y2 * y;
        s[4] += y2 * y2;
        t[0] += x;
        t[1] += x * y;
        t[2] += x * y2;
    }
    let m = Matrix3::new(s[4], s[3], s[2], s[3], s[2], s[1], s[2], s[1], s[0]);
    let v = Vector3::new(t[2], t[1], t[0]);
    let sol = m.lu().solve(&v)?;
    let fit = PolyFit {
        a: sol[0],
        b: sol[1],
        c: sol[2],
    };
    (fit.a.is_finite() && fit.b.is_finite() && fit.c.is_finite()).then_some(fit)
}
