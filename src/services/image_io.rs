//! Image decode/encode and output path construction.
//!
//! Decoding and encoding go through the `image` crate; the pipeline only
//! sees [`palettone_core::Image`].

use std::path::{Path, PathBuf};

use image::ColorType;
use palettone_core::{BlurMask, Image};

use crate::error::AppError;

/// Decode an image file into RGBA pixels.
pub fn load_image(path: &Path) -> Result<Image, AppError> {
    let decoded = image::open(path).map_err(|source| AppError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
    Image::from_rgba8(width, height, rgba.as_raw()).map_err(|e| AppError::Pipeline(e.into()))
}

/// Encode `image` at `path`, format chosen by extension.
///
/// Written as RGBA when any pixel is translucent, RGB otherwise.
pub fn save_image(path: &Path, image: &Image) -> Result<(), AppError> {
    let (width, height) = dimensions(image.width(), image.height())?;
    let result = if image.has_alpha() {
        image::save_buffer(path, &image.to_rgba8(), width, height, ColorType::Rgba8)
    } else {
        image::save_buffer(path, &image.to_rgb8(), width, height, ColorType::Rgb8)
    };
    result.map_err(|source| AppError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode a blur mask as an 8-bit grayscale image (255 = blurred).
pub fn save_mask(path: &Path, mask: &BlurMask) -> Result<(), AppError> {
    let (width, height) = dimensions(mask.width(), mask.height())?;
    image::save_buffer(path, &mask.to_luma8(), width, height, ColorType::L8).map_err(|source| {
        AppError::Image {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn dimensions(width: usize, height: usize) -> Result<(u32, u32), AppError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(AppError::ImageTooLarge { width, height }),
    }
}

/// Result path: the input's file name inside `output_dir`.
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join("output.png"),
    }
}

/// Intermediate image written in debug mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugStage {
    Quantized,
    Mask,
    Blurred,
}

impl DebugStage {
    fn suffix(self) -> &'static str {
        match self {
            DebugStage::Quantized => "1-quantized",
            DebugStage::Mask => "2-mask",
            DebugStage::Blurred => "3-blurred",
        }
    }
}

/// Debug path: `<output_dir>/<file name>.<n>-<stage>.png`.
///
/// The full input file name is kept so `a.png` and `a.jpg` in one batch do
/// not write to the same debug files. Always PNG so masks and translucent
/// stages survive regardless of the input format.
pub fn stage_path(output_dir: &Path, input: &Path, stage: DebugStage) -> PathBuf {
    let name = input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{name}.{}.png", stage.suffix()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use palettone_core::Pixel;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_keeps_file_name() {
        assert_eq!(
            output_path(Path::new("Output"), Path::new("Input/cat.jpg")),
            PathBuf::from("Output/cat.jpg")
        );
    }

    #[test]
    fn test_stage_path() {
        assert_eq!(
            stage_path(Path::new("out"), Path::new("in/cat.jpg"), DebugStage::Mask),
            PathBuf::from("out/cat.jpg.2-mask.png")
        );
        assert_eq!(
            stage_path(Path::new("out"), Path::new("in/cat.jpg"), DebugStage::Quantized),
            PathBuf::from("out/cat.jpg.1-quantized.png")
        );
    }

    #[test]
    fn test_stage_paths_differ_by_extension() {
        let out = Path::new("out");
        for stage in [DebugStage::Quantized, DebugStage::Mask, DebugStage::Blurred] {
            assert_ne!(
                stage_path(out, Path::new("in/a.png"), stage),
                stage_path(out, Path::new("in/a.jpg"), stage)
            );
        }
    }

    #[test]
    fn test_round_trip_opaque_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("opaque.png");
        let image = Image::from_fn(5, 3, |x, y| Pixel::rgb(x as u8 * 40, y as u8 * 80, 7));

        save_image(&path, &image).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb8);
        assert_eq!(load_image(&path).unwrap(), image);
    }

    #[test]
    fn test_round_trip_translucent_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alpha.png");
        let image = Image::from_fn(2, 2, |x, y| Pixel::new(10, 20, 30, (x * 100 + y * 50) as u8));

        save_image(&path, &image).unwrap();
        assert_eq!(image::open(&path).unwrap().color(), ColorType::Rgba8);
        assert_eq!(load_image(&path).unwrap(), image);
    }

    #[test]
    fn test_save_mask() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mask.png");
        let mut mask = BlurMask::new(3, 3);
        mask.mark(1, 1);

        save_mask(&path, &mask).unwrap();
        let decoded = image::open(&path).unwrap().to_luma8();
        assert_eq!(decoded.get_pixel(1, 1).0, [255]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0]);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(load_image(&path), Err(AppError::Image { .. })));
    }
}
