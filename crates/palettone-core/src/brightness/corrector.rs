//! Per-pixel brightness correction.

use crate::color::{luminance, Pixel};
use crate::raster::{check_size, Image, ImageError};

/// Lower bound for the candidate luminance in the factor's denominator.
pub const LUMINANCE_FLOOR: f64 = 0.0001;

/// `luminance(source) / luminance(candidate)`, with the denominator
/// floored at [`LUMINANCE_FLOOR`].
///
/// In stepped mode the factor is rounded to one decimal place, which
/// produces visible banding.
///
/// ```
/// use palettone_core::{correction_factor, Pixel};
///
/// let src = Pixel::rgb(120, 120, 120);
/// let candidate = Pixel::rgb(100, 100, 100);
/// assert!((correction_factor(src, candidate, false) - 1.2).abs() < 1e-9);
/// ```
#[inline]
pub fn correction_factor(source: Pixel, candidate: Pixel, stepped: bool) -> f64 {
    let src_lum = luminance(source);
    let res_lum = luminance(candidate).max(LUMINANCE_FLOOR);
    let factor = src_lum / res_lum;
    if stepped {
        (factor * 10.0).round() / 10.0
    } else {
        factor
    }
}

/// Rescales a candidate pixel toward the source pixel's luminance.
///
/// # Example
///
/// ```
/// use palettone_core::{BrightnessCorrector, Pixel};
///
/// let corrector = BrightnessCorrector::new();
/// let out = corrector.correct(Pixel::rgb(255, 255, 255), Pixel::rgb(250, 250, 250));
/// assert_eq!(out, Pixel::rgb(255, 255, 255));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrightnessCorrector {
    /// Round the factor to one decimal place.
    pub stepped: bool,
    /// Cap the factor at `255 / max(R, G, B)` so no channel clips and the
    /// candidate's hue survives brightening.
    pub preserve_hue: bool,
}

impl BrightnessCorrector {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn stepped(mut self, enabled: bool) -> Self {
        self.stepped = enabled;
        self
    }

    #[inline]
    pub fn preserve_hue(mut self, enabled: bool) -> Self {
        self.preserve_hue = enabled;
        self
    }

    /// Correct one pixel. Alpha is taken from `candidate`.
    pub fn correct(&self, source: Pixel, candidate: Pixel) -> Pixel {
        let mut factor = correction_factor(source, candidate, self.stepped);

        if self.preserve_hue {
            let peak = candidate.r.max(candidate.g).max(candidate.b);
            if peak > 0 {
                factor = factor.min(255.0 / f64::from(peak));
            }
        }

        Pixel::new(
            scale_channel(candidate.r, factor),
            scale_channel(candidate.g, factor),
            scale_channel(candidate.b, factor),
            candidate.a,
        )
    }

    /// Correct every pixel of `candidate` against the same position in
    /// `source`.
    ///
    /// # Errors
    ///
    /// [`ImageError::SizeMismatch`] if the two images differ in size.
    pub fn correct_image(&self, source: &Image, candidate: &Image) -> Result<Image, ImageError> {
        self.correct_image_with_progress(source, candidate, &mut |_| {})
    }

    pub(crate) fn correct_image_with_progress(
        &self,
        source: &Image,
        candidate: &Image,
        on_column: &mut dyn FnMut(usize),
    ) -> Result<Image, ImageError> {
        check_size(candidate.size(), source.size())?;

        let mut out = candidate.clone();
        for x in 0..candidate.width() {
            for y in 0..candidate.height() {
                out.set(x, y, self.correct(source.get(x, y), candidate.get(x, y)));
            }
            on_column(x + 1);
        }
        Ok(out)
    }
}

#[inline]
fn scale_channel(value: u8, factor: f64) -> u8 {
    (f64::from(value) * factor).round().clamp(0.0, 255.0) as u8
}
