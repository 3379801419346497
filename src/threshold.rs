//! Binary lane-feature extraction.
//!
//! Combines four per-pixel classifiers with a logical OR:
//! - scaled horizontal Sobel gradient magnitude (lane edges of any color),
//! - grayscale intensity (white paint),
//! - HLS saturation (strongly colored paint under varying light),
//! - HLS hue (yellow paint).
//!
//! Output is always defined: a frame with zero gradient everywhere simply
//! contributes nothing through the Sobel channel.

use crate::image::{FrameRgb8, ImageViewMut, MaskU8};
use serde::{Deserialize, Serialize};

/// Inclusive min/max ranges for the four feature channels.
///
/// Hue is on the halved 0–180 scale commonly used for 8-bit HLS; the default
/// 10–25 band selects yellow paint.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ThresholdParams {
    pub sobel_min: u8,
    pub sobel_max: u8,
    pub white_min: u8,
    pub white_max: u8,
    pub saturation_min: u8,
    pub saturation_max: u8,
    pub hue_min: u8,
    pub hue_max: u8,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            sobel_min: 30,
            sobel_max: 255,
            white_min: 200,
            white_max: 255,
            saturation_min: 90,
            saturation_max: 255,
            hue_min: 10,
            hue_max: 25,
        }
    }
}

/// Classify every pixel of `frame` as lane evidence (255) or background (0).
pub fn binary_threshold(frame: &FrameRgb8, params: &ThresholdParams) -> MaskU8 {
    let (w, h) = (frame.w, frame.h);
    let gray = grayscale(frame);
    let sobel = scaled_sobel_x(&gray, w, h);
    let mut mask = MaskU8::new(w, h);

    for y in 0..h {
        let out = mask.row_mut(y);
        for (x, out_px) in out.iter_mut().enumerate() {
            let i = y * w + x;
            let gray_px = gray[i].round().clamp(0.0, 255.0) as u8;
            let (hue, _lum, sat) = rgb_to_hls(frame.rgb(x, y));
            let hit = in_range(sobel[i], params.sobel_min, params.sobel_max)
                || in_range(gray_px, params.white_min, params.white_max)
                || in_range(sat, params.saturation_min, params.saturation_max)
                || in_range(hue, params.hue_min, params.hue_max);
            if hit {
                *out_px = 255;
            }
        }
    }
    mask
}

#[inline]
fn in_range(v: u8, min: u8, max: u8) -> bool {
    v >= min && v <= max
}

fn grayscale(frame: &FrameRgb8) -> Vec<f32> {
    let mut out = Vec::with_capacity(frame.w * frame.h);
    for y in 0..frame.h {
        let row = frame.row(y);
        for px in row.chunks_exact(3) {
            out.push(0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32);
        }
    }
    out
}

const SOBEL_KERNEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// |Sobel-x| rescaled to 0–255. Borders are clamp-convolved; a uniformly
/// zero gradient field maps to all zeros rather than dividing by zero.
fn scaled_sobel_x(gray: &[f32], w: usize, h: usize) -> Vec<u8> {
    let mut mag = vec![0.0f32; w * h];
    if w == 0 || h == 0 {
        return vec![0; w * h];
    }
    let mut max_mag = 0.0f32;
    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let mut sum = 0.0f32;
            for (ky, &yy) in y_idx.iter().enumerate() {
                let row = &gray[yy * w..(yy + 1) * w];
                let kernel_row = &SOBEL_KERNEL_X[ky];
                sum += row[x_idx[0]] * kernel_row[0]
                    + row[x_idx[1]] * kernel_row[1]
                    + row[x_idx[2]] * kernel_row[2];
            }
            let m = sum.abs();
            mag[y * w + x] = m;
            if m > max_mag {
                max_mag = m;
            }
        }
    }
    if max_mag <= 0.0 {
        return vec![0; w * h];
    }
    let scale = 255.0 / max_mag;
    mag.iter()
        .map(|&m| (m * scale).round().clamp(0.0, 255.0) as u8)
        .collect()
}

/// Convert an RGB pixel to 8-bit HLS: hue on the 0–180 scale, lightness and
/// saturation on 0–255.
fn rgb_to_hls(rgb: [u8; 3]) -> (u8, u8, u8) {
    let r = rgb[0] as f32 / 255.0;
    let g = rgb[1] as f32 / 255.0;
    let b = rgb[2] as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let lum = (max + min) / 2.0;
    let sat = if delta <= f32::EPSILON {
        0.0
    } else if lum < 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let hue_deg = if delta <= f32::EPSILON {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let hue_deg = if hue_deg < 0.0 {
        hue_deg + 360.0
    } else {
        hue_deg
    };

    (
        (hue_deg / 2.0).round().clamp(0.0, 180.0) as u8,
        (lum * 255.0).round() as u8,
        (sat * 255.0).round() as u8,
    )
}
