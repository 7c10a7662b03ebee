//! Luminance-preserving color correction.
//!
//! After quantization a pixel is usually brighter or darker than the
//! source it replaced. [`BrightnessCorrector`] rescales the candidate's
//! RGB so its luminance matches the source again.

mod corrector;

pub use corrector::{correction_factor, BrightnessCorrector, LUMINANCE_FLOOR};
