use image::{imageops, imageops::FilterType, RgbImage};

/// Resize to exactly `width` x `height`, ignoring aspect ratio
/// Bilinear (Triangle) interpolation; a no-op copy when the size already matches
pub fn apply(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}
