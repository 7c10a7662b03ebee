//! The [`Palette`] type and the per-pixel matcher built on it.

use std::str::FromStr;

use super::error::PaletteError;
use crate::color::{distance, DistanceMetric, Pixel, Rgb};
use crate::raster::Image;

/// An ordered, non-empty list of allowed output colors.
///
/// Order matters: when two entries are equally close to a pixel, the one
/// that appears first wins.
///
/// # Example
///
/// ```
/// use palettone_core::{DistanceMetric, Palette, Pixel, Rgb};
///
/// let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
/// let matched = palette.match_pixel(Pixel::new(200, 210, 190, 128), DistanceMetric::Manhattan);
///
/// assert_eq!(matched, Pixel::new(255, 255, 255, 128));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from colors in priority order.
    ///
    /// # Errors
    ///
    /// [`PaletteError::EmptyPalette`] if `colors` is empty. Duplicate
    /// entries are accepted; later copies are simply never selected.
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Create a palette from hex strings (`#RRGGBB` or `#RGB`).
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .enumerate()
            .map(|(index, s)| {
                Rgb::from_str(s.as_ref())
                    .map_err(|source| PaletteError::InvalidColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&colors)
    }

    /// Parse a palette list file.
    ///
    /// Every non-blank line holds one color in its first seven characters
    /// (`#RRGGBB`); the rest of the line is ignored, so entries may carry
    /// a trailing name or comment:
    ///
    /// ```
    /// use palettone_core::{Palette, Rgb};
    ///
    /// let text = "#1d2b53 dark blue\n#ff004d red\n\n#fff1e8\n";
    /// let palette = Palette::parse_list(text).unwrap();
    ///
    /// assert_eq!(palette.len(), 3);
    /// assert_eq!(palette.color(1), Rgb::new(0xff, 0x00, 0x4d));
    /// ```
    pub fn parse_list(text: &str) -> Result<Self, PaletteError> {
        let entries: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.get(..7).unwrap_or(line))
            .collect();
        Self::from_hex(&entries)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[inline]
    pub fn contains(&self, rgb: Rgb) -> bool {
        self.colors.contains(&rgb)
    }

    /// Index of the closest palette entry to `pixel`'s color.
    ///
    /// The scan keeps the first entry of minimal distance: a later entry
    /// replaces the current best only when it is strictly closer.
    pub fn find_nearest(&self, pixel: Pixel, metric: DistanceMetric) -> usize {
        let rgb = pixel.to_rgb();
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;

        for (idx, &candidate) in self.colors.iter().enumerate() {
            let dist = distance(rgb, candidate, metric);
            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }

        best_idx
    }

    /// The closest palette color, carrying over the source pixel's alpha.
    #[inline]
    pub fn match_pixel(&self, pixel: Pixel, metric: DistanceMetric) -> Pixel {
        pixel.with_rgb(self.colors[self.find_nearest(pixel, metric)])
    }

    /// Quantize every pixel of `image` to the palette.
    pub fn quantize(&self, image: &Image, metric: DistanceMetric) -> Image {
        self.quantize_with_progress(image, metric, &mut |_| {})
    }

    /// [`quantize()`](Self::quantize), calling `on_column` with the number
    /// of columns completed after each column.
    pub(crate) fn quantize_with_progress(
        &self,
        image: &Image,
        metric: DistanceMetric,
        on_column: &mut dyn FnMut(usize),
    ) -> Image {
        let mut out = Image::filled(image.width(), image.height(), Pixel::BLACK);
        for x in 0..image.width() {
            for y in 0..image.height() {
                out.set(x, y, self.match_pixel(image.get(x, y), metric));
            }
            on_column(x + 1);
        }
        out
    }
}
