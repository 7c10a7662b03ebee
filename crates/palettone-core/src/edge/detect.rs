//! Laplacian edge detection and mask dilation.

use super::BlurMask;
use crate::color::luma;
use crate::raster::Image;

/// 3x3 Laplacian: `8 * center - sum(neighbours)`.
pub const LAPLACIAN_KERNEL: [[i32; 3]; 3] = [[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]];

/// Kernel response at `(x, y)`, in luminance units.
///
/// The kernel runs over each alpha-weighted channel in integer arithmetic
/// and the BT.709 weights are applied to the three sums afterwards. The
/// result equals the Laplacian of [`luminance()`](crate::luminance), and a
/// flat neighbourhood yields exactly `0.0`.
///
/// The caller guarantees the full 3x3 neighbourhood is inside the image.
pub fn edge_response(image: &Image, x: usize, y: usize) -> f64 {
    let mut acc = [0i32; 3];
    for (ky, row) in LAPLACIAN_KERNEL.iter().enumerate() {
        let yy = y + ky - 1;
        for (kx, &weight) in row.iter().enumerate() {
            let p = image.get(x + kx - 1, yy);
            let a = i32::from(p.a);
            acc[0] += weight * i32::from(p.r) * a;
            acc[1] += weight * i32::from(p.g) * a;
            acc[2] += weight * i32::from(p.b) * a;
        }
    }
    luma(f64::from(acc[0]), f64::from(acc[1]), f64::from(acc[2])) / 255.0
}

/// Build the blur mask for a quantized image.
///
/// Every pixel at least `radius` away from each image border is an edge
/// candidate. Where the absolute kernel response exceeds `threshold`, the
/// `(2 * radius + 1)` square around it is marked. Border pixels are never
/// candidates but can be marked by a neighbouring block.
///
/// `radius` must be at least 1 so the kernel stays inside the image; a
/// zero radius yields an empty mask. An image narrower or shorter than
/// `2 * radius + 1` has no candidates and also yields an empty mask.
pub fn build_mask(quantized: &Image, radius: usize, threshold: f64) -> BlurMask {
    build_mask_with_progress(quantized, radius, threshold, &mut |_| {})
}

/// [`build_mask()`], calling `on_column` with the number of columns
/// scanned so far (including the skipped left border).
pub(crate) fn build_mask_with_progress(
    quantized: &Image,
    radius: usize,
    threshold: f64,
    on_column: &mut dyn FnMut(usize),
) -> BlurMask {
    let (width, height) = (quantized.width(), quantized.height());
    let mut mask = BlurMask::new(width, height);
    if radius == 0 {
        return mask;
    }

    for x in radius..width.saturating_sub(radius) {
        for y in radius..height.saturating_sub(radius) {
            if edge_response(quantized, x, y).abs() > threshold {
                mask.mark_block(x, y, radius);
            }
        }
        on_column(x + 1);
    }

    mask
}
