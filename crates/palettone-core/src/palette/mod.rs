//! Palette types and nearest-color matching.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::Palette;
