//! I/O helpers for frames, masks and JSON.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned interleaved RGB buffer.
//! - `save_mask`: write a binary mask to a grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{FrameRgb8, ImageView, MaskU8};
use image::{DynamicImage, ImageBuffer, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned interleaved RGB buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct RgbFrameBuf {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbFrameBuf {
    /// Construct an owned frame buffer given raw interleaved RGB bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Frame width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `FrameRgb8` view
    pub fn as_view(&self) -> FrameRgb8<'_> {
        FrameRgb8 {
            w: self.width,
            h: self.height,
            stride: 3 * self.width,
            data: &self.data,
        }
    }
}

/// Load an image from disk and convert to interleaved 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbFrameBuf, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw();
    Ok(RgbFrameBuf::new(width, height, data))
}

/// Save a binary mask to a grayscale PNG.
pub fn save_mask(mask: &MaskU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let data = if mask.is_contiguous() {
        mask.data.clone()
    } else {
        let mut out = Vec::with_capacity(mask.w * mask.h);
        for y in 0..mask.h {
            out.extend_from_slice(mask.row(y));
        }
        out
    };
    let image: ImageBuffer<Luma<u8>, Vec<u8>> =
        ImageBuffer::from_raw(mask.w as u32, mask.h as u32, data)
            .ok_or_else(|| "Failed to create image buffer".to_string())?;
    DynamicImage::ImageLuma8(image)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
