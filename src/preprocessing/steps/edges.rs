use crate::config::EdgeParams;
use image::GrayImage;
use imageproc::edges::canny;

/// Canny edge map: 255 on edges, 0 elsewhere
pub fn apply(image: &GrayImage, params: EdgeParams) -> GrayImage {
    canny(image, params.low_threshold, params.high_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_edges_found_on_step() {
        let img = GrayImage::from_fn(40, 40, |x, _| if x < 20 { Luma([0]) } else { Luma([255]) });

        let edges = apply(&img, EdgeParams::default());

        let on_step = (17..23).any(|x| edges.get_pixel(x, 20).0[0] == 255);
        assert!(on_step, "expected an edge near the intensity step");
        assert_eq!(edges.get_pixel(5, 20).0[0], 0);
        assert_eq!(edges.get_pixel(35, 20).0[0], 0);
    }

    #[test]
    fn test_flat_image_has_no_edges() {
        let img = GrayImage::from_pixel(30, 30, Luma([90]));
        let edges = apply(&img, EdgeParams::default());
        assert!(edges.pixels().all(|p| p.0[0] == 0));
    }
}
