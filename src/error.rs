use std::path::PathBuf;

use palettone_core::{PaletteError, PipelineError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read config: {0}")]
    ConfigRead(#[source] std::io::Error),

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    #[error("Failed to read palette file {}: {source}", path.display())]
    PaletteRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Image error for {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image too large: {width}x{height}")]
    ImageTooLarge { width: usize, height: usize },

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use palettone_core::ConfigError;

    #[test]
    fn test_unknown_palette() {
        let error = AppError::UnknownPalette("neon".to_string());
        assert_eq!(error.to_string(), "Unknown palette: neon");
    }

    #[test]
    fn test_palette_error() {
        let error = AppError::from(PaletteError::EmptyPalette);
        assert_eq!(error.to_string(), "Palette error: palette cannot be empty");
    }

    #[test]
    fn test_pipeline_error() {
        let error = AppError::from(PipelineError::Config(ConfigError::NonPositiveBlurRadius));
        assert_eq!(
            error.to_string(),
            "Pipeline error: configuration error: blur radius must be a positive integer"
        );
    }

    #[test]
    fn test_image_too_large() {
        let error = AppError::ImageTooLarge {
            width: 70000,
            height: 2,
        };
        assert_eq!(error.to_string(), "Image too large: 70000x2");
    }

    #[test]
    fn test_palette_read() {
        let error = AppError::PaletteRead {
            path: PathBuf::from("Palette.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read palette file Palette.txt: missing"
        );
    }

    #[test]
    fn test_io_from() {
        let io = std::io::Error::other("boom");
        match AppError::from(io) {
            AppError::Io(_) => {}
            other => panic!("Expected Io variant, got {other:?}"),
        }
    }
}
