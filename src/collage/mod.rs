//! Grid collage builder
//!
//! Loads every image of a folder, resizes and frames them, and tiles them
//! row by row into one picture.

pub mod compose;
pub mod loader;

pub use compose::{add_border, create_collage, resize_images};
pub use loader::{load_images, LoadedImage, LoadedImages, SkippedFile};

use crate::config::{CollageConfig, GridSize};
use crate::error::CollageError;
use crate::preview::Preview;
use image::DynamicImage;
use serde::Serialize;
use std::path::PathBuf;

/// Summary of a finished collage run
#[derive(Debug, Clone, Serialize)]
pub struct CollageOutcome {
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub grid: GridSize,
    pub images_used: usize,
    pub images_available: usize,
    pub skipped: Vec<PathBuf>,
}

/// Load, compose, preview and save a collage according to `config`
pub fn run(config: &CollageConfig, preview: &dyn Preview) -> Result<CollageOutcome, CollageError> {
    config.validate()?;

    let loaded = load_images(&config.input_dir)?;
    if loaded.is_empty() {
        return Err(CollageError::NoImages {
            path: config.input_dir.clone(),
        });
    }

    let available = loaded.len();
    let LoadedImages { images, skipped } = loaded;
    let images: Vec<DynamicImage> = images
        .into_iter()
        .take(config.grid.cells())
        .map(|l| l.image)
        .collect();
    if images.len() < config.grid.cells() {
        return Err(CollageError::InsufficientImages {
            required: config.grid.cells(),
            available,
        });
    }

    let collage = create_collage(
        &images,
        config.grid,
        config.tile_size,
        config.border,
        config.border_color,
    )?;

    let shown = DynamicImage::ImageRgb8(collage);
    preview.show("Collage", &shown)?;

    save(&shown, config)?;
    tracing::info!("Collage saved to {:?}", config.output_path);

    Ok(CollageOutcome {
        output_path: config.output_path.clone(),
        width: shown.width(),
        height: shown.height(),
        grid: config.grid,
        images_used: config.grid.cells(),
        images_available: available,
        skipped: skipped.into_iter().map(|s| s.path).collect(),
    })
}

fn save(collage: &DynamicImage, config: &CollageConfig) -> Result<(), CollageError> {
    collage
        .save(&config.output_path)
        .map_err(|source| CollageError::Save {
            path: config.output_path.clone(),
            source,
        })
}
