//! [`Image`]: a row-major grid of [`Pixel`]s.

use thiserror::Error;

use crate::color::Pixel;

/// Pixel buffer does not match the requested dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("buffer holds {actual} values, {width}x{height} needs {expected}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Two rasters combined pixel by pixel differ in size
    #[error("{}x{} raster does not match {}x{}", actual.0, actual.1, expected.0, expected.1)]
    SizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

/// Fail with [`ImageError::SizeMismatch`] unless both sizes are equal.
pub(crate) fn check_size(
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<(), ImageError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ImageError::SizeMismatch { expected, actual })
    }
}

/// A `width x height` grid of RGBA pixels, origin top-left.
///
/// Pixels are stored in row-major order and addressed by `(x, y)` with
/// `x < width` and `y < height`. The pipeline only ever reads its input
/// image; every stage produces a new `Image`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Wrap a row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// [`ImageError::DimensionMismatch`] if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self, ImageError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(ImageError::DimensionMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image where every pixel is `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        }
    }

    /// Build an image by evaluating `f(x, y)` for every position.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Pixel) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// From interleaved `[R, G, B, A, ...]` bytes.
    pub fn from_rgba8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, ImageError> {
        Self::from_channels::<4>(width, height, bytes, |c| Pixel::new(c[0], c[1], c[2], c[3]))
    }

    /// From interleaved `[R, G, B, ...]` bytes; every pixel is opaque.
    pub fn from_rgb8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, ImageError> {
        Self::from_channels::<3>(width, height, bytes, |c| Pixel::rgb(c[0], c[1], c[2]))
    }

    fn from_channels<const N: usize>(
        width: usize,
        height: usize,
        bytes: &[u8],
        to_pixel: impl Fn(&[u8]) -> Pixel,
    ) -> Result<Self, ImageError> {
        let expected = width * height * N;
        if bytes.len() != expected {
            return Err(ImageError::DimensionMismatch {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes.chunks_exact(N).map(to_pixel).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Pixel {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.pixels[y * self.width + x] = pixel;
    }

    /// True when at least one pixel is not fully opaque.
    pub fn has_alpha(&self) -> bool {
        self.pixels.iter().any(|p| !p.is_opaque())
    }

    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    /// Interleaved RGB bytes; alpha is dropped.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_rgb().to_bytes()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_size() {
        assert_eq!(check_size((3, 2), (3, 2)), Ok(()));
        let err = check_size((3, 2), (2, 4)).unwrap_err();
        assert_eq!(
            err,
            ImageError::SizeMismatch {
                expected: (3, 2),
                actual: (2, 4)
            }
        );
        assert_eq!(err.to_string(), "2x4 raster does not match 3x2");
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = Image::new(2, 2, vec![Pixel::BLACK; 3]).unwrap_err();
        assert_eq!(
            err,
            ImageError::DimensionMismatch {
                width: 2,
                height: 2,
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_row_major_addressing() {
        let image = Image::from_fn(3, 2, |x, y| Pixel::rgb(x as u8, y as u8, 0));
        assert_eq!(image.get(2, 1), Pixel::rgb(2, 1, 0));
        assert_eq!(image.pixels()[3], Pixel::rgb(0, 1, 0));
    }

    #[test]
    fn test_rgb8_input_is_opaque() {
        let image = Image::from_rgb8(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert!(!image.has_alpha());
        assert_eq!(image.get(1, 0), Pixel::new(4, 5, 6, 255));
        assert_eq!(image.to_rgb8(), vec![1, 2, 3, 4, 5, 6]);
        assert!(Image::from_rgb8(2, 1, &[1, 2, 3]).is_err());
    }

    #[test]
    fn test_rgba8_keeps_alpha() {
        let bytes = [10, 20, 30, 40, 50, 60, 70, 255];
        let image = Image::from_rgba8(1, 2, &bytes).unwrap();
        assert!(image.has_alpha());
        assert_eq!(image.get(0, 0).a, 40);
        assert_eq!(image.to_rgba8(), bytes.to_vec());
    }
}
