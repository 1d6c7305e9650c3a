use image::{imageops, GenericImageView, GrayImage, Pixel};

/// Convert image to grayscale
/// Both the edge search and the OCR binarization start from this
pub fn apply<I, P>(image: &I) -> GrayImage
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8>,
{
    imageops::grayscale(image)
}
