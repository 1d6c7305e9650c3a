use crate::config::{GridSize, TileSize};
use crate::error::CollageError;
use crate::preprocessing::steps::{border, resize};
use image::{imageops, DynamicImage, Rgb, RgbImage};

/// Resize every image to exactly `size`
pub fn resize_images(images: &[RgbImage], size: TileSize) -> Vec<RgbImage> {
    images
        .iter()
        .map(|img| resize::apply(img, size.width, size.height))
        .collect()
}

/// Add a `thickness`-pixel frame of `color` around `image`
pub fn add_border(image: &RgbImage, thickness: u32, color: Rgb<u8>) -> RgbImage {
    border::apply(image, thickness, color)
}

/// Tile the first `rows * cols` images into a bordered grid
///
/// Images fill the grid row by row. Every tile is resized to `size` and framed
/// with `border` pixels of `color`, so the result is
/// `cols * (size.width + 2 * border)` wide and
/// `rows * (size.height + 2 * border)` tall.
pub fn create_collage(
    images: &[DynamicImage],
    grid: GridSize,
    size: TileSize,
    border: u32,
    color: Rgb<u8>,
) -> Result<RgbImage, CollageError> {
    let required = grid.cells();
    if images.len() < required {
        return Err(CollageError::InsufficientImages {
            required,
            available: images.len(),
        });
    }

    let rgb: Vec<RgbImage> = images[..required].iter().map(|img| img.to_rgb8()).collect();
    let tiles: Vec<RgbImage> = resize_images(&rgb, size)
        .iter()
        .map(|img| add_border(img, border, color))
        .collect();

    let rows: Vec<RgbImage> = tiles.chunks(grid.cols as usize).map(hstack).collect();
    let collage = vstack(&rows);

    tracing::debug!(
        "Built {} collage: {}x{}",
        grid,
        collage.width(),
        collage.height()
    );
    Ok(collage)
}

/// Concatenate images left to right; heights must match
fn hstack(images: &[RgbImage]) -> RgbImage {
    let width = images.iter().map(|img| img.width()).sum();
    let height = images.first().map_or(0, |img| img.height());
    let mut out = RgbImage::new(width, height);
    let mut x = 0i64;
    for img in images {
        imageops::replace(&mut out, img, x, 0);
        x += img.width() as i64;
    }
    out
}

/// Concatenate images top to bottom; widths must match
fn vstack(images: &[RgbImage]) -> RgbImage {
    let width = images.first().map_or(0, |img| img.width());
    let height = images.iter().map(|img| img.height()).sum();
    let mut out = RgbImage::new(width, height);
    let mut y = 0i64;
    for img in images {
        imageops::replace(&mut out, img, 0, y);
        y += img.height() as i64;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([value, value, value])))
    }

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn test_collage_dimensions() {
        let images: Vec<_> = (0..6).map(|i| solid(50 + i * 10, 40, 0)).collect();
        let grid = GridSize { rows: 2, cols: 3 };
        let size = TileSize {
            width: 30,
            height: 20,
        };

        let collage = create_collage(&images, grid, size, 4, WHITE).unwrap();

        assert_eq!(collage.width(), 3 * (30 + 2 * 4));
        assert_eq!(collage.height(), 2 * (20 + 2 * 4));
    }

    #[test]
    fn test_insufficient_images() {
        let images = vec![solid(10, 10, 0); 3];
        let grid = GridSize { rows: 2, cols: 2 };
        let size = TileSize {
            width: 10,
            height: 10,
        };

        let err = create_collage(&images, grid, size, 1, WHITE).unwrap_err();

        assert!(matches!(
            err,
            CollageError::InsufficientImages {
                required: 4,
                available: 3
            }
        ));
        assert_eq!(err.to_string(), "not enough images: need 4, have 3");
    }

    #[test]
    fn test_extra_images_are_ignored() {
        let images: Vec<_> = (0..5).map(|i| solid(10, 10, i as u8 * 50)).collect();
        let grid = GridSize { rows: 1, cols: 2 };
        let size = TileSize {
            width: 10,
            height: 10,
        };

        let collage = create_collage(&images, grid, size, 0, WHITE).unwrap();

        assert_eq!(collage.dimensions(), (20, 10));
        assert_eq!(*collage.get_pixel(5, 5), Rgb([0, 0, 0]));
        assert_eq!(*collage.get_pixel(15, 5), Rgb([50, 50, 50]));
    }

    #[test]
    fn test_tiles_fill_rows_first() {
        let images: Vec<_> = [10u8, 20, 30, 40].iter().map(|&v| solid(8, 8, v)).collect();
        let grid = GridSize { rows: 2, cols: 2 };
        let size = TileSize {
            width: 8,
            height: 8,
        };

        let collage = create_collage(&images, grid, size, 2, WHITE).unwrap();

        // Each framed tile is 12x12
        assert_eq!(*collage.get_pixel(6, 6), Rgb([10, 10, 10]));
        assert_eq!(*collage.get_pixel(18, 6), Rgb([20, 20, 20]));
        assert_eq!(*collage.get_pixel(6, 18), Rgb([30, 30, 30]));
        assert_eq!(*collage.get_pixel(18, 18), Rgb([40, 40, 40]));
        assert_eq!(*collage.get_pixel(0, 0), WHITE);
        assert_eq!(*collage.get_pixel(12, 12), WHITE);
    }

    #[test]
    fn test_resize_is_idempotent_in_dimensions() {
        let images = vec![
            RgbImage::new(17, 33),
            RgbImage::new(400, 12),
            RgbImage::new(1, 1),
        ];
        let size = TileSize {
            width: 25,
            height: 15,
        };

        let once = resize_images(&images, size);
        let twice = resize_images(&once, size);

        for (a, b) in once.iter().zip(&twice) {
            assert_eq!(a.dimensions(), (25, 15));
            assert_eq!(a.dimensions(), b.dimensions());
        }
    }

    #[test]
    fn test_add_border_dimensions() {
        let framed = add_border(&RgbImage::new(12, 7), 3, WHITE);
        assert_eq!(framed.dimensions(), (18, 13));
        assert_eq!(*framed.get_pixel(0, 0), WHITE);
        assert_eq!(*framed.get_pixel(17, 12), WHITE);
        assert_eq!(*framed.get_pixel(3, 3), Rgb([0, 0, 0]));
    }
}
