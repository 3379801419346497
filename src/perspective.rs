//! Fixed planar homography between the camera's road view and a bird's-eye
//! rectangle.
//!
//! Both directions are estimated once from a configured quadrilateral pair
//! via the DLT (solve A·h = 0 by SVD, smallest singular value). Warping
//! samples nearest neighbor: the only rectified entity in the core is the
//! binary mask, where interpolation would manufacture gray evidence.

use crate::error::LaneError;
use crate::image::{ImageViewMut, MaskU8};
use nalgebra::{DMatrix, Matrix3, Vector3};
use serde::{Deserialize, Serialize};

const EPS: f64 = 1e-9;

/// Source trapezoid (road plane in the camera view) and destination
/// rectangle (bird's-eye view), four `[x, y]` pixel points each.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PerspectiveQuads {
    pub src: [[f64; 2]; 4],
    pub dst: [[f64; 2]; 4],
}

impl Default for PerspectiveQuads {
    fn default() -> Self {
        Self {
            src: [
                [190.0, 720.0],
                [596.0, 447.0],
                [685.0, 447.0],
                [1125.0, 720.0],
            ],
            dst: [
                [300.0, 720.0],
                [300.0, 0.0],
                [980.0, 0.0],
                [980.0, 720.0],
            ],
        }
    }
}

/// Precomputed forward (road trapezoid → rectangle) and inverse homographies.
#[derive(Clone, Debug)]
pub struct PerspectiveRectifier {
    forward: Matrix3<f64>,
    inverse: Matrix3<f64>,
}

impl PerspectiveRectifier {
    /// Estimate both homographies from the configured quad pair. Collinear
    /// source points surface as a configuration error here, never per frame.
    pub fn new(quads: &PerspectiveQuads) -> Result<Self, LaneError> {
        let forward = dlt_homography(&quads.src, &quads.dst)?;
        let inverse = dlt_homography(&quads.dst, &quads.src)?;
        Ok(Self { forward, inverse })
    }

    /// Road trapezoid → bird's-eye rectangle mapping.
    pub fn forward(&self) -> &Matrix3<f64> {
        &self.forward
    }

    /// Bird's-eye rectangle → road trapezoid mapping.
    pub fn inverse(&self) -> &Matrix3<f64> {
        &self.inverse
    }

    /// Warp a mask into bird's-eye space, same pixel dimensions.
    pub fn rectify(&self, mask: &MaskU8) -> MaskU8 {
        // Each output pixel samples the source through the dst→src mapping.
        warp_nearest(mask, &self.inverse)
    }

    /// Warp a bird's-eye mask back into the original camera space.
    pub fn derectify(&self, mask: &MaskU8) -> MaskU8 {
        warp_nearest(mask, &self.forward)
    }
}

/// Map points through a homography; `None` if any point lands at infinity.
pub fn apply_homography_points(h: &Matrix3<f64>, pts: &[[f64; 2]]) -> Option<Vec<[f64; 2]>> {
    let mut out = Vec::with_capacity(pts.len());
    for &p in pts {
        let v = h * Vector3::new(p[0], p[1], 1.0);
        let w = v[2];
        if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
            return None;
        }
        out.push([v[0] / w, v[1] / w]);
    }
    Some(out)
}

fn warp_nearest(src: &MaskU8, back_map: &Matrix3<f64>) -> MaskU8 {
    let (w, h) = (src.w, src.h);
    let mut out = MaskU8::new(w, h);
    for y in 0..h {
        let out_row = out.row_mut(y);
        for (x, out_px) in out_row.iter_mut().enumerate() {
            let v = back_map * Vector3::new(x as f64, y as f64, 1.0);
            if v[2].abs() <= EPS {
                continue;
            }
            let sx = (v[0] / v[2]).round();
            let sy = (v[1] / v[2]).round();
            if sx < 0.0 || sy < 0.0 || sx >= w as f64 || sy >= h as f64 {
                continue;
            }
            *out_px = src.get(sx as usize, sy as usize);
        }
    }
    out
}

/// Estimate H such that dst ~ H · src from four correspondences using DLT.
fn dlt_homography(src: &[[f64; 2]; 4], dst: &[[f64; 2]; 4]) -> Result<Matrix3<f64>, LaneError> {
    // Four correspondences give 8 constraint rows; the ninth zero row makes
    // the system square so the thin SVD still carries the null-space vector.
    let mut a = DMatrix::<f64>::zeros(9, 9);
    for (i, (ps, pd)) in src.iter().zip(dst.iter()).enumerate() {
        let [x, y] = *ps;
        let [u, v] = *pd;
        let r0 = 2 * i;
        let r1 = 2 * i + 1;

        a[(r0, 0)] = -x;
        a[(r0, 1)] = -y;
        a[(r0, 2)] = -1.0;
        a[(r0, 6)] = u * x;
        a[(r0, 7)] = u * y;
        a[(r0, 8)] = u;

        a[(r1, 3)] = -x;
        a[(r1, 4)] = -y;
        a[(r1, 5)] = -1.0;
        a[(r1, 6)] = v * x;
        a[(r1, 7)] = v * y;
        a[(r1, 8)] = v;
    }

    let svd = a.svd(false, true);
    let v_t = svd
        .v_t
        .ok_or_else(|| LaneError::Config("homography SVD failed".into()))?;
    let hvec = v_t.row(v_t.nrows() - 1);

    let mut h = Matrix3::zeros();
    for r in 0..3 {
        for c in 0..3 {
            h[(r, c)] = hvec[3 * r + c];
        }
    }

    let scale = h[(2, 2)];
    if scale.abs() <= EPS {
        return Err(LaneError::Config(
            "degenerate perspective quad (collinear points?)".into(),
        ));
    }
    Ok(h / scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_corners_map_exactly() {
        let quads = PerspectiveQuads::default();
        let rect = PerspectiveRectifier::new(&quads).expect("rectifier");
        let mapped = apply_homography_points(rect.forward(), &quads.src).expect("mapped");
        for (got, want) in mapped.iter().zip(quads.dst.iter()) {
            assert!((got[0] - want[0]).abs() < 1e-6, "{got:?} vs {want:?}");
            assert!((got[1] - want[1]).abs() < 1e-6, "{got:?} vs {want:?}");
        }
    }

    #[test]
    fn round_trip_is_subpixel_inside_the_source_quad() {
        let rect = PerspectiveRectifier::new(&PerspectiveQuads::default()).expect("rectifier");
        let pts = [[400.0, 600.0], [640.0, 500.0], [900.0, 700.0]];
        let there = apply_homography_points(rect.forward(), &pts).expect("forward");
        let back = apply_homography_points(rect.inverse(), &there).expect("inverse");
        for (got, want) in back.iter().zip(pts.iter()) {
            assert!((got[0] - want[0]).abs() < 1e-3);
            assert!((got[1] - want[1]).abs() < 1e-3);
        }
    }

    #[test]
    fn rectified_mask_keeps_dimensions() {
        let rect = PerspectiveRectifier::new(&PerspectiveQuads::default()).expect("rectifier");
        let mut mask = MaskU8::new(1280, 720);
        mask.set(640, 600, 255);
        let warped = rect.rectify(&mask);
        assert_eq!((warped.w, warped.h), (1280, 720));
    }
}
