//! Masked Gaussian blur.
//!
//! The blur itself is [`image::imageops::blur`]; this module owns the
//! conversion to and from [`Image`] and the masked paste that decides which
//! blurred pixels make it into the result.
//!
//! The paste is all-or-nothing per pixel. Pixels just outside the mask keep
//! their quantized value, so a seam can remain at the mask boundary.

use image::{Rgba, RgbaImage};

use crate::color::Pixel;
use crate::edge::BlurMask;
use crate::raster::{check_size, Image, ImageError};

/// Gaussian blur of all four channels with standard deviation `sigma`.
pub fn gaussian_blur(image: &Image, sigma: f32) -> Image {
    if image.width() == 0 || image.height() == 0 {
        return image.clone();
    }

    let buffer = RgbaImage::from_fn(image.width() as u32, image.height() as u32, |x, y| {
        Rgba(image.get(x as usize, y as usize).to_bytes())
    });
    let blurred = image::imageops::blur(&buffer, sigma);

    Image::from_fn(image.width(), image.height(), |x, y| {
        Pixel::from(blurred.get_pixel(x as u32, y as u32).0)
    })
}

/// Take `blurred` where `mask` is set and `base` everywhere else.
///
/// # Errors
///
/// [`ImageError::SizeMismatch`] if `blurred` or `mask` is not the size of
/// `base`.
pub fn composite(base: &Image, blurred: &Image, mask: &BlurMask) -> Result<Image, ImageError> {
    check_size(base.size(), blurred.size())?;
    check_size(base.size(), (mask.width(), mask.height()))?;

    Ok(Image::from_fn(base.width(), base.height(), |x, y| {
        if mask.get(x, y) {
            blurred.get(x, y)
        } else {
            base.get(x, y)
        }
    }))
}

/// Blur `image` with `sigma = radius` and paste the result through `mask`.
///
/// An empty mask returns a copy of `image` without blurring. A mask of a
/// different size is an [`ImageError::SizeMismatch`].
pub fn apply(image: &Image, mask: &BlurMask, radius: usize) -> Result<Image, ImageError> {
    check_size(image.size(), (mask.width(), mask.height()))?;
    if mask.is_empty() {
        return Ok(image.clone());
    }
    let blurred = gaussian_blur(image, radius as f32);
    composite(image, &blurred, mask)
}
