use image::{imageops, Rgb, RgbImage};

/// Surround the image with a constant-color frame `thickness` pixels wide
pub fn apply(image: &RgbImage, thickness: u32, color: Rgb<u8>) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut framed = RgbImage::from_pixel(width + 2 * thickness, height + 2 * thickness, color);
    imageops::replace(&mut framed, image, thickness as i64, thickness as i64);
    framed
}
