use crate::error::CollageError;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// File extensions picked up from the input folder (compared lowercase)
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// An image decoded from the input folder
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub image: DynamicImage,
}

/// A file with an image extension that could not be decoded
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning a folder
#[derive(Debug, Default)]
pub struct LoadedImages {
    pub images: Vec<LoadedImage>,
    pub skipped: Vec<SkippedFile>,
}

impl LoadedImages {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }
}

/// Check the extension against `IMAGE_EXTENSIONS`, case-insensitively
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Decode every image in `folder`
///
/// Files are visited in file-name order. Files without an image extension are
/// ignored; files that have one but fail to decode are listed in `skipped`.
pub fn load_images(folder: &Path) -> Result<LoadedImages, CollageError> {
    let read_dir_err = |source: std::io::Error| CollageError::ReadDir {
        path: folder.to_path_buf(),
        source,
    };

    let entries = std::fs::read_dir(folder)
        .map_err(read_dir_err)?
        .map(|entry| entry.map(|e| e.path()));
    let paths = image_paths(folder, entries);

    let mut loaded = LoadedImages::default();
    for path in paths {
        match image::open(&path) {
            Ok(image) => {
                tracing::debug!(
                    "Loaded {:?} ({}x{})",
                    path,
                    image.width(),
                    image.height()
                );
                loaded.images.push(LoadedImage { path, image });
            }
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", path, e);
                loaded.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        "Loaded {} image(s) from {:?}, skipped {}",
        loaded.images.len(),
        folder,
        loaded.skipped.len()
    );
    Ok(loaded)
}

/// Image files among `entries`, sorted by file name
///
/// Entries the directory listing could not read are logged and left out.
fn image_paths(
    folder: &Path,
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {:?}: {}", folder, e);
                None
            }
        })
        .filter(|path| path.is_file() && has_image_extension(path))
        .collect();
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    paths
}
