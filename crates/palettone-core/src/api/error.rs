//! Unified error type for the palettone-core public API.

use thiserror::Error;

use crate::palette::PaletteError;
use crate::raster::ImageError;

/// Invalid pipeline parameters, detected before any pixel is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown distance metric '{0}' (expected 'euclidean' or 'manhattan')")]
    InvalidMetric(String),

    #[error("blur radius must be a positive integer")]
    NonPositiveBlurRadius,

    #[error("blur threshold must be a non-negative number, got {0}")]
    InvalidThreshold(f64),

    #[error("progress step must be between 1 and 100 percent, got {0}")]
    InvalidProgressStep(u8),
}

/// Any failure raised by the crate, for `?` propagation in callers.
///
/// ```
/// use palettone_core::{Palette, PipelineError};
///
/// fn load() -> Result<Palette, PipelineError> {
///     Ok(Palette::from_hex(&["#000000", "#ffffff"])?)
/// }
/// assert_eq!(load().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("image error: {0}")]
    Image(#[from] ImageError),
}
