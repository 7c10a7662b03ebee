//! Public API: pipeline options, the [`Pipeline`] runner and the unified
//! [`PipelineError`].

mod error;
mod options;
mod pipeline;

pub use error::{ConfigError, PipelineError};
pub use options::PipelineOptions;
pub use pipeline::{process_image, Pipeline, ProcessedImage, Progress, Stage, StageImages};
