//! palettone-core: palette quantization that keeps the source's tone
//!
//! This library restricts an RGBA image to a fixed palette in three
//! stages, then hands the result back to the caller. It does no file or
//! codec work of its own.
//!
//! # Quick Start
//!
//! ```
//! use palettone_core::{Image, Palette, Pipeline, PipelineOptions, Pixel};
//!
//! let palette = Palette::from_hex(&["#000000", "#ff0000", "#ffffff"]).unwrap();
//! let pipeline = Pipeline::new(palette, PipelineOptions::new()).unwrap();
//!
//! let source = Image::filled(4, 4, Pixel::rgb(200, 40, 40));
//! let result = pipeline.process(&source).unwrap();
//!
//! assert_eq!(result.image.width(), 4);
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//! source RGBA
//!     |
//!     v
//! Quantize                 nearest palette entry per pixel (Euclidean or
//!     |                    Manhattan RGB distance, first entry wins ties),
//!     |                    source alpha kept
//!     v
//! [Blur]                   Laplacian over luminance -> edge pixels ->
//!     |                    square dilation by `blur_radius` -> BlurMask;
//!     |                    Gaussian blur pasted through the mask
//!     v
//! [BrightnessCorrect]      RGB scaled by lum(source) / lum(candidate),
//!     |                    rounded and clamped per channel
//!     v
//! result RGBA
//! ```
//!
//! Quantization alone flattens shading: every pixel snaps to a palette
//! color whose luminance can be far from the source. The blur softens the
//! hard steps between palette regions, and the brightness stage then pulls
//! each pixel back toward the source's luminance. The result is no longer
//! strictly palette-constrained once brightness correction runs; it keeps
//! the palette's hues at the source's brightness.
//!
//! # Luminance
//!
//! Both edge detection and brightness correction use BT.709 relative
//! luminance on the 8-bit values, weighted by opacity:
//!
//! ```text
//! L = (0.2126 R + 0.7152 G + 0.0722 B) * A / 255
//! ```
//!
//! No gamma decoding is applied.

pub mod api;
pub mod blur;
pub mod brightness;
pub mod color;
pub mod edge;
pub mod palette;
pub mod raster;


pub use api::{
    process_image, ConfigError, Pipeline, PipelineError, PipelineOptions, ProcessedImage,
    Progress, Stage, StageImages,
};
pub use brightness::{correction_factor, BrightnessCorrector, LUMINANCE_FLOOR};
pub use color::{distance, luminance, DistanceMetric, Pixel, Rgb};
pub use edge::{build_mask, BlurMask};
pub use palette::{Palette, PaletteError, ParseColorError};
pub use raster::{Image, ImageError};
