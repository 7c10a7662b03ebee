//! Test fixtures: a throwaway input/output directory pair and sample images.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

/// Two-colour palette used by most tests
pub const MONO: [&str; 2] = ["#000000", "#ffffff"];

/// Temporary directory laid out like a real run: `Input/`, `Output/`
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(dir.path().join("Input")).expect("Failed to create Input");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root().join("Input")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("Output")
    }

    /// Write an image into `Input/` and return its path
    pub fn add_image(&self, name: &str, image: &RgbaImage) -> PathBuf {
        let path = self.input_dir().join(name);
        image.save(&path).expect("Failed to write fixture image");
        path
    }

    /// Write arbitrary bytes into `Input/` (e.g. a corrupt image)
    pub fn add_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.input_dir().join(name);
        fs::write(&path, bytes).expect("Failed to write fixture file");
        path
    }

    /// Write a file relative to the workspace root
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }
}

/// Horizontal grey ramp, opaque
pub fn grey_ramp(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / width.saturating_sub(1).max(1)) as u8;
        Rgba([v, v, v, 255])
    })
}

/// Left half black, right half white
pub fn split(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
}

/// Solid colour with a translucent top row
pub fn translucent(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |_, y| {
        let a = if y == 0 { 128 } else { 255 };
        Rgba([rgb[0], rgb[1], rgb[2], a])
    })
}
