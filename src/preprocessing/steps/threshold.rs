use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;

/// Binarize with a global threshold picked by Otsu's method
/// Returns the chosen level and the binary image (0 or 255)
pub fn apply(image: &GrayImage) -> (u8, GrayImage) {
    let level = otsu_level(image);
    (level, binarize(image, level))
}

/// Pixels strictly above `level` become white, the rest black
pub fn binarize(image: &GrayImage, level: u8) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        if image.get_pixel(x, y).0[0] > level {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarizes_image() {
        let img = GrayImage::from_fn(50, 50, |x, _| Luma([(x as u8 * 5).min(255)]));

        let (_, result) = apply(&img);

        for pixel in result.pixels() {
            assert!(
                pixel.0[0] == 0 || pixel.0[0] == 255,
                "Expected binary pixel, got {}",
                pixel.0[0]
            );
        }
    }

    #[test]
    fn test_threshold_separates_text_from_background() {
        // Dark characters on a light plate
        let mut img = GrayImage::from_pixel(50, 20, Luma([240]));
        for x in 10..40 {
            img.put_pixel(x, 10, Luma([20]));
        }

        let (level, result) = apply(&img);

        assert!((20..240).contains(&level), "level {} not between classes", level);
        assert_eq!(result.get_pixel(25, 10).0[0], 0);
        assert_eq!(result.get_pixel(25, 5).0[0], 255);
    }
}
