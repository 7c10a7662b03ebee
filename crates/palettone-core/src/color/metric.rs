//! Luminance and color distance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Pixel, Rgb};
use crate::api::ConfigError;

/// ITU-R BT.709 luma weights.
const LUMA_R: f64 = 0.2126;
const LUMA_G: f64 = 0.7152;
const LUMA_B: f64 = 0.0722;

/// Relative luminance of a pixel, scaled by its opacity.
///
/// `0.2126 R + 0.7152 G + 0.0722 B`, multiplied by `A / 255`. An opaque
/// pixel ranges over `[0, 255]`; a fully transparent one is always `0`.
/// No clamping is applied.
///
/// ```
/// use palettone_core::{luminance, Pixel};
///
/// assert!((luminance(Pixel::rgb(255, 255, 255)) - 255.0).abs() < 1e-9);
/// assert_eq!(luminance(Pixel::new(0, 0, 0, 0)), 0.0);
/// ```
#[inline]
pub fn luminance(pixel: Pixel) -> f64 {
    let weighted = luma(
        f64::from(pixel.r),
        f64::from(pixel.g),
        f64::from(pixel.b),
    );
    weighted * f64::from(pixel.a) / 255.0
}

/// BT.709 weighted sum of three channel values.
#[inline]
pub(crate) fn luma(r: f64, g: f64, b: f64) -> f64 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// How "closest" is measured when matching a pixel against the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// `sqrt(dR² + dG² + dB²)`
    Euclidean,
    /// `|dR| + |dG| + |dB|`
    #[default]
    Manhattan,
}

impl DistanceMetric {
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Manhattan => "manhattan",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMetric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(DistanceMetric::Euclidean),
            "manhattan" => Ok(DistanceMetric::Manhattan),
            _ => Err(ConfigError::InvalidMetric(s.to_string())),
        }
    }
}

/// Distance between two colors over R, G and B. Alpha never participates.
///
/// ```
/// use palettone_core::{distance, DistanceMetric, Rgb};
///
/// let a = Rgb::new(0, 0, 0);
/// let b = Rgb::new(3, 4, 0);
/// assert_eq!(distance(a, b, DistanceMetric::Euclidean), 5.0);
/// assert_eq!(distance(a, b, DistanceMetric::Manhattan), 7.0);
/// ```
#[inline]
pub fn distance(c1: Rgb, c2: Rgb, metric: DistanceMetric) -> f64 {
    let dr = f64::from(c1.r) - f64::from(c2.r);
    let dg = f64::from(c1.g) - f64::from(c2.g);
    let db = f64::from(c1.b) - f64::from(c2.b);

    match metric {
        DistanceMetric::Euclidean => (dr * dr + dg * dg + db * db).sqrt(),
        DistanceMetric::Manhattan => dr.abs() + dg.abs() + db.abs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_white_and_black() {
        assert!((luminance(Pixel::rgb(255, 255, 255)) - 255.0).abs() < 1e-9);
        assert_eq!(luminance(Pixel::rgb(0, 0, 0)), 0.0);
        assert_eq!(luminance(Pixel::new(0, 0, 0, 0)), 0.0);
    }

    #[test]
    fn test_luminance_weights() {
        assert!((luminance(Pixel::rgb(255, 0, 0)) - 0.2126 * 255.0).abs() < 1e-9);
        assert!((luminance(Pixel::rgb(0, 255, 0)) - 0.7152 * 255.0).abs() < 1e-9);
        assert!((luminance(Pixel::rgb(0, 0, 255)) - 0.0722 * 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_luminance_scaled_by_alpha() {
        let opaque = luminance(Pixel::rgb(200, 100, 50));
        let half = luminance(Pixel::new(200, 100, 50, 51));
        assert!((half - opaque * 0.2).abs() < 1e-9);
        assert_eq!(luminance(Pixel::new(255, 255, 255, 0)), 0.0);
    }

    #[test]
    fn test_distance_pythagorean_triple() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(3, 4, 0);
        assert_eq!(distance(a, b, DistanceMetric::Euclidean), 5.0);
        assert_eq!(distance(a, b, DistanceMetric::Manhattan), 7.0);
    }

    #[test]
    fn test_distance_is_commutative() {
        let a = Rgb::new(12, 200, 33);
        let b = Rgb::new(250, 1, 99);
        for metric in [DistanceMetric::Euclidean, DistanceMetric::Manhattan] {
            assert_eq!(distance(a, b, metric), distance(b, a, metric));
            assert_eq!(distance(a, a, metric), 0.0);
        }
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!("Euclidean".parse::<DistanceMetric>().unwrap(), DistanceMetric::Euclidean);
        assert_eq!(" manhattan ".parse::<DistanceMetric>().unwrap(), DistanceMetric::Manhattan);
        assert_eq!(
            "chebyshev".parse::<DistanceMetric>(),
            Err(ConfigError::InvalidMetric("chebyshev".to_string()))
        );
        assert_eq!(DistanceMetric::default(), DistanceMetric::Manhattan);
    }
}
