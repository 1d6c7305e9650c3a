use super::contour::PlateContour;
use image::{imageops, GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};

/// Cut the plate out of `image`
///
/// Pixels outside the quadrilateral are blacked out and the result is cropped
/// to the contour's bounding rectangle. `None` when there is no contour or it
/// lies entirely outside the image.
pub fn extract_plate(image: &RgbImage, contour: Option<&PlateContour>) -> Option<RgbImage> {
    let contour = contour?;
    let (width, height) = image.dimensions();
    let rect = contour.bounding_rect().clamp_to(width, height)?;

    let mut mask = GrayImage::new(width, height);
    draw_polygon_mut(&mut mask, contour.points(), Luma([255u8]));

    let crop = imageops::crop_imm(image, rect.x as u32, rect.y as u32, rect.width, rect.height);
    let mut plate = crop.to_image();
    for (x, y, pixel) in plate.enumerate_pixels_mut() {
        if mask.get_pixel(x + rect.x as u32, y + rect.y as u32).0[0] == 0 {
            *pixel = Rgb([0, 0, 0]);
        }
    }

    tracing::debug!(
        "Cropped plate at ({}, {}) size {}x{}",
        rect.x,
        rect.y,
        rect.width,
        rect.height
    );
    Some(plate)
}

/// Outline the contour on `image` with lines `thickness` pixels wide
pub fn draw_contour(image: &mut RgbImage, contour: &PlateContour, color: Rgb<u8>, thickness: u32) {
    let points = contour.points();
    let half = (thickness / 2) as i32;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        for dy in -half..=half {
            for dx in -half..=half {
                draw_line_segment_mut(
                    image,
                    ((a.x + dx) as f32, (a.y + dy) as f32),
                    ((b.x + dx) as f32, (b.y + dy) as f32),
                    color,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::point::Point;

    fn contour(points: [(i32, i32); 4]) -> PlateContour {
        let pts: Vec<_> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        PlateContour::from_points(&pts).unwrap()
    }

    #[test]
    fn test_no_contour_returns_none() {
        let img = RgbImage::new(20, 20);
        assert!(extract_plate(&img, None).is_none());
    }

    #[test]
    fn test_crop_matches_bounding_rect() {
        let img = RgbImage::from_pixel(100, 60, Rgb([200, 200, 200]));
        let quad = contour([(10, 20), (70, 20), (70, 45), (10, 45)]);

        let plate = extract_plate(&img, Some(&quad)).unwrap();

        let rect = quad.bounding_rect();
        assert_eq!(plate.dimensions(), (rect.width, rect.height));
        assert_eq!(plate.dimensions(), (61, 26));
        assert_eq!(*plate.get_pixel(30, 10), Rgb([200, 200, 200]));
    }

    #[test]
    fn test_outside_quadrilateral_is_masked() {
        let img = RgbImage::from_pixel(60, 60, Rgb([255, 255, 255]));
        // Diamond: its bounding box corners are outside the polygon
        let quad = contour([(30, 5), (55, 30), (30, 55), (5, 30)]);

        let plate = extract_plate(&img, Some(&quad)).unwrap();

        assert_eq!(*plate.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*plate.get_pixel(25, 25), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_contour_outside_image() {
        let img = RgbImage::new(20, 20);
        let quad = contour([(30, 30), (40, 30), (40, 40), (30, 40)]);
        assert!(extract_plate(&img, Some(&quad)).is_none());
    }

    #[test]
    fn test_draw_contour_marks_edges() {
        let mut img = RgbImage::new(50, 50);
        let quad = contour([(10, 10), (40, 10), (40, 40), (10, 40)]);
        let green = Rgb([0, 255, 0]);

        draw_contour(&mut img, &quad, green, 3);

        assert_eq!(*img.get_pixel(25, 10), green);
        assert_eq!(*img.get_pixel(25, 11), green);
        assert_eq!(*img.get_pixel(25, 25), Rgb([0, 0, 0]));
    }
}
