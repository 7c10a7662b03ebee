//! [`BlurMask`]: a boolean grid with clipped block writes.

/// Per-pixel flags marking where the blur stage takes blurred pixels.
///
/// The buffer is sized to the image up front and only ever gains `true`
/// bits, so overlapping writes from neighbouring edges commute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlurMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl BlurMask {
    /// An all-`false` mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x]
    }

    /// Set a single position. Out-of-grid positions are ignored.
    #[inline]
    pub fn mark(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.bits[y * self.width + x] = true;
        }
    }

    /// Set the `(2 * radius + 1)` square centered on `(cx, cy)`.
    ///
    /// The block is clipped to the grid, so centres near the border only
    /// write their in-bounds part.
    pub fn mark_block(&mut self, cx: usize, cy: usize, radius: usize) {
        if self.bits.is_empty() {
            return;
        }
        let x0 = cx.saturating_sub(radius);
        let y0 = cy.saturating_sub(radius);
        let x1 = cx.saturating_add(radius).min(self.width - 1);
        let y1 = cy.saturating_add(radius).min(self.height - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }

        for y in y0..=y1 {
            let row = y * self.width;
            self.bits[row + x0..=row + x1].fill(true);
        }
    }

    /// Number of `true` positions.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// True when nothing is marked.
    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }

    /// Row-major `0`/`255` bytes, for writing the mask as a grayscale image.
    pub fn to_luma8(&self) -> Vec<u8> {
        self.bits.iter().map(|&b| if b { 255 } else { 0 }).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mask_is_empty() {
        let mask = BlurMask::new(4, 3);
        assert!(mask.is_empty());
        assert_eq!(mask.count(), 0);
        assert_eq!(mask.to_luma8().len(), 12);
    }

    #[test]
    fn test_mark_block_interior() {
        let mut mask = BlurMask::new(7, 7);
        mask.mark_block(3, 3, 1);
        assert_eq!(mask.count(), 9);
        assert!(mask.get(2, 2) && mask.get(4, 4));
        assert!(!mask.get(1, 3) && !mask.get(3, 5));
    }

    #[test]
    fn test_mark_block_clips_at_edges() {
        let mut mask = BlurMask::new(5, 4);
        mask.mark_block(0, 0, 2);
        assert_eq!(mask.count(), 9);

        mask.mark_block(4, 3, 1);
        assert_eq!(mask.count(), 9 + 4);
        assert!(mask.get(3, 2) && mask.get(4, 3));
    }

    #[test]
    fn test_overlapping_blocks_are_monotonic() {
        let mut a = BlurMask::new(8, 8);
        a.mark_block(3, 3, 1);
        a.mark_block(4, 3, 1);

        let mut b = BlurMask::new(8, 8);
        b.mark_block(4, 3, 1);
        b.mark_block(3, 3, 1);
        b.mark_block(3, 3, 1);

        assert_eq!(a, b);
        assert_eq!(a.count(), 12);
    }

    #[test]
    fn test_mark_ignores_out_of_grid() {
        let mut mask = BlurMask::new(2, 2);
        mask.mark(5, 0);
        assert!(mask.is_empty());
        mask.mark(1, 1);
        assert_eq!(mask.to_luma8(), vec![0, 0, 0, 255]);
    }

    #[test]
    fn test_mark_block_far_outside_is_noop() {
        let mut mask = BlurMask::new(3, 3);
        mask.mark_block(10, 10, 1);
        assert!(mask.is_empty());
    }

    #[test]
    fn test_zero_sized_mask() {
        let mut mask = BlurMask::new(0, 0);
        mask.mark_block(0, 0, 3);
        assert!(mask.is_empty());
    }
}
