//! Edge detection and the dilated blur mask.
//!
//! Quantization leaves hard steps between palette colors. [`build_mask()`]
//! finds them with a Laplacian kernel over luminance and marks a square
//! neighbourhood around each one in a [`BlurMask`], which the blur stage
//! then uses to decide where blurred pixels replace quantized ones.

mod detect;
mod mask;

pub use detect::{build_mask, edge_response, LAPLACIAN_KERNEL};
pub(crate) use detect::build_mask_with_progress;
pub use mask::BlurMask;
