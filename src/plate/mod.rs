//! License plate locator and recognizer
//!
//! The plate is taken to be the largest quadrilateral outline in the photo:
//! grayscale, bilateral smoothing and Canny produce an edge map, the biggest
//! contours are simplified to polygons, and the first one with four corners
//! is cropped, binarized and handed to the OCR engine.

pub mod contour;
pub mod extract;
pub mod recognize;

pub use contour::{find_plate_contour, BoundingRect, PlateContour};
pub use extract::{draw_contour, extract_plate};
pub use recognize::recognize_text;

use crate::config::{DenoiseParams, EdgeParams, PlateConfig};
use crate::engine::OcrEngine;
use crate::error::PlateError;
use crate::preprocessing::steps::{denoise, edges, grayscale};
use crate::preprocessing::{StepTimer, StepTiming};
use crate::preview::Preview;
use image::{DynamicImage, GrayImage};
use serde::Serialize;
use std::path::Path;

/// A successfully read plate
#[derive(Debug, Clone, Serialize)]
pub struct PlateReading {
    /// Trimmed OCR output, possibly empty
    pub text: String,
    pub engine: String,
    /// Plate corners as `[x, y]`
    pub corners: [[i32; 2]; 4],
    pub bounding_rect: BoundingRect,
    pub total_time_ms: u64,
    pub steps: Vec<StepTiming>,
}

/// Grayscale, denoise and edge-detect a photo
/// Returns the grayscale image and the Canny edge map
pub fn preprocess_image(
    image: &DynamicImage,
    denoise_params: DenoiseParams,
    edge_params: EdgeParams,
) -> (GrayImage, GrayImage) {
    let gray = grayscale::apply(image);
    let smoothed = denoise::apply(&gray, denoise_params);
    let edge_map = edges::apply(&smoothed, edge_params);
    (gray, edge_map)
}

/// Read the plate in `config.image_path`
pub fn run(
    config: &PlateConfig,
    engine: &dyn OcrEngine,
    preview: &dyn Preview,
) -> Result<PlateReading, PlateError> {
    process_license_plate(&config.image_path, config, engine, preview)
}

/// Locate, crop and read the license plate in the photo at `path`
///
/// Stops at the first failure. The annotated photo is only previewed once
/// the text has been read.
pub fn process_license_plate(
    path: &Path,
    config: &PlateConfig,
    engine: &dyn OcrEngine,
    preview: &dyn Preview,
) -> Result<PlateReading, PlateError> {
    let mut timer = StepTimer::new();

    let image = timer
        .run_step("load", || image::open(path))
        .map_err(|source| PlateError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!("Loaded {:?} ({}x{})", path, image.width(), image.height());

    let (_gray, edge_map) = timer.run_step("preprocess", || {
        preprocess_image(&image, config.denoise, config.edges)
    });

    let plate_contour = timer
        .run_step("find_contour", || find_plate_contour(&edge_map, config.contour))
        .ok_or(PlateError::PlateNotFound)?;
    let bounding_rect = plate_contour.bounding_rect();
    tracing::info!("Plate contour found: {:?}", plate_contour.corners());

    let mut rgb = image.to_rgb8();
    let plate = timer
        .run_step("extract", || extract_plate(&rgb, Some(&plate_contour)))
        .ok_or(PlateError::Crop)?;

    let text = timer.run_step("recognize", || recognize_text(&plate, engine))?;
    tracing::info!("Recognized plate text: {:?}", text);

    draw_contour(
        &mut rgb,
        &plate_contour,
        config.annotation_color,
        config.annotation_thickness,
    );
    preview.show("Detected license plate", &DynamicImage::ImageRgb8(rgb))?;

    Ok(PlateReading {
        text,
        engine: engine.name().to_string(),
        corners: plate_contour.corners(),
        bounding_rect,
        total_time_ms: timer.total_time_ms(),
        steps: timer.into_steps(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage};
    use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut};
    use imageproc::point::Point;
    use imageproc::rect::Rect;

    /// Dark scene with one bright, clearly bounded plate
    fn synthetic_car() -> RgbImage {
        let mut img = RgbImage::from_pixel(240, 160, Rgb([40, 40, 40]));
        draw_filled_rect_mut(&mut img, Rect::at(60, 50).of_size(120, 50), Rgb([235, 235, 235]));
        img
    }

    #[test]
    fn test_preprocess_outputs_same_size() {
        let img = DynamicImage::ImageRgb8(synthetic_car());
        let (gray, edge_map) = preprocess_image(&img, DenoiseParams::default(), EdgeParams::default());
        assert_eq!(gray.dimensions(), (240, 160));
        assert_eq!(edge_map.dimensions(), (240, 160));
        assert!(edge_map.pixels().any(|p| p.0[0] == 255));
        assert!(edge_map.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn test_synthetic_plate_is_found_and_cropped() {
        let img = synthetic_car();
        let (_, edge_map) = preprocess_image(
            &DynamicImage::ImageRgb8(img.clone()),
            DenoiseParams::default(),
            EdgeParams::default(),
        );

        let contour = find_plate_contour(&edge_map, Default::default()).unwrap();
        let rect = contour.bounding_rect();
        assert!((rect.x - 60).abs() <= 3, "x = {}", rect.x);
        assert!((rect.y - 50).abs() <= 3, "y = {}", rect.y);
        assert!((rect.width as i32 - 120).abs() <= 6, "width = {}", rect.width);
        assert!((rect.height as i32 - 50).abs() <= 6, "height = {}", rect.height);

        let plate = extract_plate(&img, Some(&contour)).unwrap();
        assert_eq!(plate.dimensions(), (rect.width, rect.height));
    }

    /// Bright 140x45 plate centred in a dark scene, tilted by `degrees`
    fn tilted_car(degrees: f64) -> RgbImage {
        let mut img = RgbImage::from_pixel(300, 200, Rgb([40, 40, 40]));
        let (cx, cy) = (150.0, 100.0);
        let (sin, cos) = degrees.to_radians().sin_cos();
        let corners: Vec<Point<i32>> = [(-70.0, -22.5), (70.0, -22.5), (70.0, 22.5), (-70.0, 22.5)]
            .iter()
            .map(|&(x, y): &(f64, f64)| {
                Point::new(
                    (cx + x * cos - y * sin).round() as i32,
                    (cy + x * sin + y * cos).round() as i32,
                )
            })
            .collect();
        draw_polygon_mut(&mut img, &corners, Rgb([235, 235, 235]));
        img
    }

    #[test]
    fn test_slightly_tilted_plates_are_found() {
        for degrees in [-3.0, -2.0, -1.0, 1.0, 2.0, 3.0] {
            let (_, edge_map) = preprocess_image(
                &DynamicImage::ImageRgb8(tilted_car(degrees)),
                DenoiseParams::default(),
                EdgeParams::default(),
            );

            let contour = find_plate_contour(&edge_map, Default::default());

            assert!(contour.is_some(), "no plate at {} degrees", degrees);
            let rect = contour.unwrap().bounding_rect();
            assert!((rect.width as i32 - 140).abs() <= 8, "width = {}", rect.width);
        }
    }

    #[test]
    fn test_featureless_photo_has_no_plate() {
        let img = GrayImage::from_pixel(80, 80, Luma([120]));
        let (_, edge_map) = preprocess_image(
            &DynamicImage::ImageLuma8(img),
            DenoiseParams::default(),
            EdgeParams::default(),
        );
        assert!(find_plate_contour(&edge_map, Default::default()).is_none());
    }
}
