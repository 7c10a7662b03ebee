//! The RGBA raster every pipeline stage reads and writes.

mod image;

pub(crate) use self::image::check_size;
pub use self::image::{Image, ImageError};
