pub mod batch;
pub mod image_io;

pub use batch::{list_images, BatchReport, BatchRunner};
