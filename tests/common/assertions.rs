//! Assertion helpers for tests.

use std::path::Path;

use image::RgbaImage;
use pretty_assertions::assert_eq;

/// Assert a file exists and decodes as an image; return it as RGBA
pub fn assert_image(path: &Path) -> RgbaImage {
    assert!(path.exists(), "Expected {} to exist", path.display());
    image::open(path)
        .unwrap_or_else(|e| panic!("{} is not a readable image: {e}", path.display()))
        .to_rgba8()
}

/// Assert every pixel's colour (ignoring alpha) is one of `colors`
pub fn assert_only_colors(image: &RgbaImage, colors: &[[u8; 3]]) {
    for (x, y, p) in image.enumerate_pixels() {
        let rgb = [p[0], p[1], p[2]];
        assert!(
            colors.contains(&rgb),
            "Pixel ({x}, {y}) = {rgb:?} is not in {colors:?}"
        );
    }
}

/// Assert two images have the same dimensions
pub fn assert_same_size(a: &RgbaImage, b: &RgbaImage) {
    assert_eq!(a.dimensions(), b.dimensions(), "Image dimensions differ");
}
