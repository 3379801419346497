//! Owned single-channel 0/255 mask in row-major layout (stride == width).
//!
//! Rectified and unrectified masks are both represented by this type; they
//! live in different coordinate spaces and are never mixed by the pipeline.

/// Binary lane-evidence mask. Nonzero pixels are lane evidence.
#[derive(Clone, Debug, Default)]
pub struct MaskU8 {
    /// Mask width in pixels
    pub w: usize,
    /// Mask height in pixels
    pub h: usize,
    /// Number of bytes between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<u8>,
}

impl MaskU8 {
    /// Construct an all-background mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0; w * h],
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Coordinates of every nonzero pixel as `(x, y)`, in row-major order.
    pub fn nonzero(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..self.h {
            let start = y * self.stride;
            let row = &self.data[start..start + self.w];
            for (x, &px) in row.iter().enumerate() {
                if px != 0 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    /// Number of nonzero pixels.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&px| px != 0).count()
    }
}

impl crate::image::traits::ImageView for MaskU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl crate::image::traits::ImageViewMut for MaskU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
