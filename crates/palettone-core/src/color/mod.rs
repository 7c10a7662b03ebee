//! Color types and color-space utilities.
//!
//! - [`Pixel`]: 8-bit RGBA, the single pixel shape used by every stage
//! - [`Rgb`]: an opaque palette color
//! - [`luminance()`] and [`distance()`]: the two scalar measures the
//!   pipeline is built on

mod metric;
mod pixel;

pub use metric::{distance, luminance, DistanceMetric};
pub(crate) use metric::luma;
pub use pixel::{Pixel, Rgb};
