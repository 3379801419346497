/// Borrowed interleaved RGB frame view, 8 bits per channel, no alpha.
#[derive(Clone, Debug)]
pub struct FrameRgb8<'a> {
    pub w: usize,
    pub h: usize,
    /// Bytes between consecutive rows (>= 3 * w).
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> FrameRgb8<'a> {
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        let i = y * self.stride + 3 * x;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Interleaved RGB bytes of row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + 3 * self.w]
    }
}
