use lane_detector::image::MaskU8;

/// Rectified-space binary mask with two full-height vertical lane bands.
pub fn vertical_band_mask(
    width: usize,
    height: usize,
    left_x: usize,
    right_x: usize,
    half_width: usize,
) -> MaskU8 {
    assert!(width > 0 && height > 0, "mask dimensions must be positive");
    let mut mask = MaskU8::new(width, height);
    for y in 0..height {
        for &cx in &[left_x, right_x] {
            for x in cx.saturating_sub(half_width)..(cx + half_width + 1).min(width) {
                mask.set(x, y, 255);
            }
        }
    }
    mask
}

/// Dark RGB road frame with white lane lines painted along the default
/// perspective source trapezoid, so rectification yields vertical bands
/// near x=300 and x=980.
pub fn synthetic_road_rgb(width: usize, height: usize) -> Vec<u8> {
    let mut rgb = vec![40u8; width * height * 3];
    let edges = [
        ((190.0f64, 720.0f64), (596.0f64, 447.0f64)),
        ((1125.0, 720.0), (685.0, 447.0)),
    ];
    for ((x0, y0), (x1, y1)) in edges {
        for y in (y1 as usize)..(y0 as usize).min(height) {
            let t = (y as f64 - y0) / (y1 - y0);
            let cx = (x0 + t * (x1 - x0)).round() as i64;
            for x in (cx - 8).max(0)..(cx + 8).min(width as i64) {
                let i = (y * width + x as usize) * 3;
                rgb[i] = 255;
                rgb[i + 1] = 255;
                rgb[i + 2] = 255;
            }
        }
    }
    rgb
}

/// Uniform dark frame carrying no lane evidence at all.
pub fn blank_road_rgb(width: usize, height: usize) -> Vec<u8> {
    vec![40u8; width * height * 3]
}
