//! Lane pixel localization in the rectified binary mask.
//!
//! Two strategies behind one entry point, selected by [`SearchMode`]:
//!
//! - **Blind** (cold start): a column histogram over the bottom half of the
//!   mask seeds one base per half; stacked windows then trace each lane from
//!   the vehicle upward, recentering on the mean x of the pixels they catch.
//! - **Guided** (tracking): a single pass keeps every nonzero pixel within
//!   ±margin of the averaged prior curve at its row.
//!
//! A guided search that leaves either side empty falls back to the blind
//! search for the frame; the caller's history is untouched by the fallback.

use crate::image::{ImageView, MaskU8};
use crate::types::{PixelSet, PolyFit};
use log::debug;
use serde::{Deserialize, Serialize};

/// Sliding-window geometry knobs, shared with the guided band half-width.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WindowParams {
    /// Number of stacked windows per lane.
    pub nwindows: usize,
    /// Window (and guided band) half-width in pixels.
    pub margin: usize,
    /// Minimum pixels caught before a window recenters.
    pub minpix: usize,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            nwindows: 9,
            margin: 100,
            minpix: 50,
        }
    }
}

/// Which strategy to run; `Guided` carries the averaged prior per lane.
#[derive(Clone, Copy, Debug)]
pub enum SearchMode {
    Blind,
    Guided { left: PolyFit, right: PolyFit },
}

/// Candidate pixels for both lanes.
#[derive(Clone, Debug, Default)]
pub struct LanePixels {
    pub left: PixelSet,
    pub right: PixelSet,
}

/// Locate candidate lane pixels in a rectified mask.
pub fn locate_lane_pixels(mask: &MaskU8, mode: &SearchMode, params: &WindowParams) -> LanePixels {
    match mode {
        SearchMode::Blind => sliding_window_search(mask, params),
        SearchMode::Guided { left, right } => {
            let found = band_search(mask, left, right, params.margin);
            if found.left.is_empty() || found.right.is_empty() {
                debug!(
                    "guided search ran dry (left={} right={}) -> blind fallback",
                    found.left.len(),
                    found.right.len()
                );
                sliding_window_search(mask, params)
            } else {
                found
            }
        }
    }
}

/// Histogram-seeded sliding-window search.
fn sliding_window_search(mask: &MaskU8, params: &WindowParams) -> LanePixels {
    let histogram = column_histogram(mask);
    let (left_base, right_base) = histogram_bases(&histogram);
    let nonzero = mask.nonzero();
    let window_height = if params.nwindows > 0 {
        mask.h / params.nwindows
    } else {
        mask.h
    };

    let mut out = LanePixels::default();
    let mut left_center = left_base as i64;
    let mut right_center = right_base as i64;
    for window in 0..params.nwindows {
        let (win_y_low, win_y_high) = window_y_bounds(mask.h, window_height, window);
        left_center = collect_window(
            &nonzero,
            win_y_low,
            win_y_high,
            left_center,
            params,
            &mut out.left,
        );
        right_center = collect_window(
            &nonzero,
            win_y_low,
            win_y_high,
            right_center,
            params,
            &mut out.right,
        );
    }
    out
}

/// Vertical bounds of window `index`, counted from the image bottom.
/// Always satisfies `0 <= low < high <= height`.
pub(crate) fn window_y_bounds(height: usize, window_height: usize, index: usize) -> (usize, usize) {
    let high = height.saturating_sub(index * window_height);
    let low = height.saturating_sub((index + 1) * window_height);
    (low, high)
}

/// Gather mask pixels inside `center ± margin` for one band, appending them
/// to `out`. Returns the recentered x for the next (higher) band, unchanged
/// when fewer than `minpix` pixels were caught.
fn collect_window(
    nonzero: &[(usize, usize)],
    y_low: usize,
    y_high: usize,
    center: i64,
    params: &WindowParams,
    out: &mut PixelSet,
) -> i64 {
    let x_low = center - params.margin as i64;
    let x_high = center + params.margin as i64;
    let mut sum_x = 0i64;
    let mut count = 0i64;
    for &(x, y) in nonzero {
        let xi = x as i64;
        if y >= y_low && y < y_high && xi >= x_low && xi < x_high {
            out.push(x as f64, y as f64);
            sum_x += xi;
            count += 1;
        }
    }
    if count >= params.minpix as i64 && count > 0 {
        sum_x / count
    } else {
        center
    }
}

/// Single-pass band test against the averaged prior curves.
fn band_search(mask: &MaskU8, left: &PolyFit, right: &PolyFit, margin: usize) -> LanePixels {
    let margin = margin as f64;
    let mut out = LanePixels::default();
    for (x, y) in mask.nonzero() {
        let (xf, yf) = (x as f64, y as f64);
        let left_x = left.eval(yf);
        if xf > left_x - margin && xf < left_x + margin {
            out.left.push(xf, yf);
        }
        let right_x = right.eval(yf);
        if xf > right_x - margin && xf < right_x + margin {
            out.right.push(xf, yf);
        }
    }
    out
}

/// Nonzero-pixel count per column over the bottom half of the mask.
fn column_histogram(mask: &MaskU8) -> Vec<u32> {
    let mut histogram = vec![0u32; mask.w];
    for y in mask.h / 2..mask.h {
        for (x, &px) in mask.row(y).iter().enumerate() {
            if px != 0 {
                histogram[x] += 1;
            }
        }
    }
    histogram
}

/// Peak column per half. An empty half seeds at its own midpoint; the search
/// then proceeds with a weak yield and the fitter reports the shortage.
fn histogram_bases(histogram: &[u32]) -> (usize, usize) {
    let midpoint = histogram.len() / 2;
    let left = argmax(&histogram[..midpoint]).unwrap_or_else(|| {
        debug!("empty left histogram half -> seeding at half midpoint");
        midpoint / 2
    });
    let right = argmax(&histogram[midpoint..])
        .map(|i| i + midpoint)
        .unwrap_or_else(|| {
            debug!("empty right histogram half -> seeding at half midpoint");
            midpoint + (histogram.len() - midpoint) / 2
        });
    (left, right)
}

fn argmax(values: &[u32]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v > 0 && best.map_or(true, |(_, bv)| v > bv) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band_mask(w: usize, h: usize, centers: &[usize], half_width: usize) -> MaskU8 {
        let mut mask = MaskU8::new(w, h);
        for y in 0..h {
            for &cx in centers {
                for x in cx.saturating_sub(half_width)..(cx + half_width + 1).min(w) {
                    mask.set(x, y, 255);
                }
            }
        }
        mask
    }

    #[test]
    fn window_bounds_are_monotonic_and_in_range() {
        let height = 720usize;
        let nwindows = 9usize;
        let window_height = height / nwindows;
        for i in 0..nwindows {
            let (low, high) = window_y_bounds(height, window_height, i);
            assert!(low < high, "window {i}: {low}..{high}");
            assert!(high <= height);
        }
        // Bottom window touches the image bottom.
        assert_eq!(window_y_bounds(height, window_height, 0).1, height);
    }

    #[test]
    fn histogram_seeds_on_the_band_columns() {
        let mask = band_mask(1280, 720, &[300, 980], 5);
        let histogram = column_histogram(&mask);
        let (left, right) = histogram_bases(&histogram);
        assert!((295..=305).contains(&left), "left = {left}");
        assert!((975..=985).contains(&right), "right = {right}");
    }

    #[test]
    fn empty_halves_seed_at_half_midpoints() {
        let mask = MaskU8::new(1280, 720);
        let histogram = column_histogram(&mask);
        assert_eq!(histogram_bases(&histogram), (320, 960));
    }

    #[test]
    fn blind_search_collects_both_bands() {
        let mask = band_mask(1280, 720, &[300, 980], 5);
        let pixels = locate_lane_pixels(&mask, &SearchMode::Blind, &WindowParams::default());
        assert!(pixels.left.len() > 1000);
        assert!(pixels.right.len() > 1000);
        assert!(pixels.left.xs.iter().all(|&x| (290.0..311.0).contains(&x)));
        assert!(pixels.right.xs.iter().all(|&x| (970.0..991.0).contains(&x)));
    }

    #[test]
    fn guided_search_tracks_the_prior_band() {
        let mask = band_mask(1280, 720, &[300, 980], 5);
        let mode = SearchMode::Guided {
            left: PolyFit {
                a: 0.0,
                b: 0.0,
                c: 300.0,
            },
            right: PolyFit {
                a: 0.0,
                b: 0.0,
                c: 980.0,
            },
        };
        let pixels = locate_lane_pixels(&mask, &mode, &WindowParams::default());
        assert!(!pixels.left.is_empty());
        assert!(!pixels.right.is_empty());
        assert_eq!(pixels.left.len(), pixels.left.ys.len());
    }

    #[test]
    fn dry_guided_search_matches_blind_search() {
        let mask = band_mask(1280, 720, &[300, 980], 5);
        // Priors far away from any evidence: both bands come up empty.
        let mode = SearchMode::Guided {
            left: PolyFit {
                a: 0.0,
                b: 0.0,
                c: 50.0,
            },
            right: PolyFit {
                a: 0.0,
                b: 0.0,
                c: 1200.0,
            },
        };
        let params = WindowParams::default();
        let guided = locate_lane_pixels(&mask, &mode, &params);
        let blind = locate_lane_pixels(&mask, &SearchMode::Blind, &params);
        assert_eq!(guided.left.xs, blind.left.xs);
        assert_eq!(guided.left.ys, blind.left.ys);
        assert_eq!(guided.right.xs, blind.right.xs);
        assert_eq!(guided.right.ys, blind.right.ys);
    }
}
