//! Real-world curvature radius and vehicle offset from pixel-space fits.

use crate::fit::fit_pairs;
use crate::types::{CurvatureResult, PolyFit};
use serde::{Deserialize, Serialize};

/// Real-world pixel scale of the rectified view.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ScaleParams {
    /// Meters per pixel along the image's vertical axis.
    pub ym_per_pix: f64,
    /// Meters per pixel along the image's horizontal axis.
    pub xm_per_pix: f64,
}

impl Default for ScaleParams {
    fn default() -> Self {
        Self {
            ym_per_pix: 30.0 / 720.0,
            xm_per_pix: 3.7 / 700.0,
        }
    }
}

// Below this the world-space fit counts as dead straight. Real curved lanes
// sit around |2a| ~ 1e-3 (R ~ 1 km), so the gap is comfortable.
const STRAIGHT_EPS: f64 = 1e-9;

/// Curvature radius of both boundaries at the row nearest the vehicle.
///
/// Re-fits the dense sampled curves in world units, then evaluates
/// `R = (1 + (2a·y + b)²)^1.5 / |2a|` at the bottom of the image. A
/// numerically zero leading coefficient reports an infinite radius instead
/// of failing; a straight lane is a valid physical state.
pub fn measure_curvature(
    left_x: &[f64],
    right_x: &[f64],
    height: usize,
    scale: &ScaleParams,
) -> CurvatureResult {
    let ys_m: Vec<f64> = (0..height).map(|y| y as f64 * scale.ym_per_pix).collect();
    let y_eval = height.saturating_sub(1) as f64 * scale.ym_per_pix;
    CurvatureResult {
        left_radius_m: radius_of(&ys_m, left_x, scale.xm_per_pix, y_eval),
        right_radius_m: radius_of(&ys_m, right_x, scale.xm_per_pix, y_eval),
    }
}

fn radius_of(ys_m: &[f64], xs_px: &[f64], xm_per_pix: f64, y_eval: f64) -> f64 {
    let xs_m: Vec<f64> = xs_px.iter().map(|x| x * xm_per_pix).collect();
    let Some(fit) = fit_pairs(ys_m, &xs_m) else {
        return f64::INFINITY;
    };
    let denom = (2.0 * fit.a).abs();
    if denom < STRAIGHT_EPS {
        return f64::INFINITY;
    }
    let slope = 2.0 * fit.a * y_eval + fit.b;
    (1.0 + slope * slope).powf(1.5) / denom
}

/// Signed lateral offset of the vehicle from lane center, in meters.
///
/// Evaluates both pixel-space fits at the bottom image row (the vehicle's
/// position), takes their midpoint as lane center and the image's horizontal
/// midpoint as the camera centerline. Negative means the vehicle sits left
/// of lane center.
pub fn measure_vehicle_offset(
    left_fit: &PolyFit,
    right_fit: &PolyFit,
    width: usize,
    height: usize,
    scale: &ScaleParams,
) -> f64 {
    let y = height.saturating_sub(1) as f64;
    let lane_center = (left_fit.eval(y) + right_fit.eval(y)) / 2.0;
    let vehicle_center = width as f64 / 2.0;
    (vehicle_center - lane_center) * scale.xm_per_pix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(c: f64) -> PolyFit {
        PolyFit { a: 0.0, b: 0.0, c }
    }

    #[test]
    fn straight_bands_report_very_large_radius() {
        let left = straight(300.0).sample(720);
        let right = straight(980.0).sample(720);
        let result = measure_curvature(&left, &right, 720, &ScaleParams::default());
        assert!(result.left_radius_m > 5000.0, "{}", result.left_radius_m);
        assert!(result.right_radius_m > 5000.0, "{}", result.right_radius_m);
    }

    #[test]
    fn curved_lane_radius_matches_closed_form() {
        let scale = ScaleParams::default();
        // World-space curve x = a·y² with a = 1/(2R); at y where slope is
        // small the radius formula should return roughly R.
        let r = 500.0;
        let a_world = 1.0 / (2.0 * r);
        let height = 720usize;
        let xs_px: Vec<f64> = (0..height)
            .map(|y| {
                let ym = y as f64 * scale.ym_per_pix;
                (a_world * ym * ym) / scale.xm_per_pix + 300.0
            })
            .collect();
        let result = measure_curvature(&xs_px, &xs_px, height, &scale);
        // Slope at the bottom row is 2a·30 = 0.06, so the correction term is
        // small but nonzero.
        assert!(
            (result.left_radius_m - r).abs() / r < 0.05,
            "{}",
            result.left_radius_m
        );
    }

    #[test]
    fn offset_sign_follows_convention() {
        let scale = ScaleParams::default();
        // Lane center 50 px right of the image midpoint -> vehicle is left
        // of center -> negative offset.
        let offset = measure_vehicle_offset(&straight(350.0), &straight(1030.0), 1280, 720, &scale);
        assert!(offset < 0.0, "{offset}");
        assert!((offset - (-50.0 * scale.xm_per_pix)).abs() < 1e-9);

        // Symmetric case: centered lane, zero offset.
        let centered = measure_vehicle_offset(&straight(300.0), &straight(980.0), 1280, 720, &scale);
        assert!(centered.abs() < 1e-9, "{centered}");
    }
}
