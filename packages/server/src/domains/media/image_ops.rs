//! Image preparation for Instagram's square format.

use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;

pub const TARGET_SIZE: u32 = 1080;

/// Largest centered square inside a width x height frame.
/// Returns (x, y, side).
pub fn center_square(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    let x = (width - side) / 2;
    let y = (height - side) / 2;
    (x, y, side)
}

/// Crop to a centered square and resize to 1080x1080, saved as JPEG.
/// Overwrites the input file in place.
pub fn square_for_instagram(path: &Path) -> Result<()> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?;

    let (x, y, side) = center_square(img.width(), img.height());
    let squared = img
        .crop_imm(x, y, side, side)
        .resize_exact(TARGET_SIZE, TARGET_SIZE, FilterType::Lanczos3);

    squared
        .to_rgb8()
        .save_with_format(path, image::ImageFormat::Jpeg)
        .with_context(|| format!("Failed to save image {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    #[test]
    fn centers_square_in_landscape_and_portrait() {
        assert_eq!(center_square(1920, 1080), (420, 0, 1080));
        assert_eq!(center_square(1080, 1920), (0, 420, 1080));
        assert_eq!(center_square(500, 500), (0, 0, 500));
    }

    #[test]
    fn squares_a_landscape_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        let img = DynamicImage::ImageRgb8(RgbImage::new(400, 200));
        img.to_rgb8()
            .save_with_format(&path, image::ImageFormat::Jpeg)
            .unwrap();

        square_for_instagram(&path).unwrap();

        let out = image::open(&path).unwrap();
        assert_eq!(out.width(), TARGET_SIZE);
        assert_eq!(out.height(), TARGET_SIZE);
    }
}
