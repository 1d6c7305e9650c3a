//! Model and training data downloads shared by the in-process engines

use crate::error::OcrError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Per-user cache directory for downloaded OCR data, created on demand
pub fn cache_dir(subdir: &str) -> Result<PathBuf, OcrError> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("collage-plate")
        .join(subdir);

    std::fs::create_dir_all(&dir).map_err(|e| {
        OcrError::InitializationError(format!("Failed to create cache directory {:?}: {}", dir, e))
    })?;

    Ok(dir)
}

/// Download `url` into `path` unless it is already there
pub fn ensure_downloaded(url: &str, path: &Path) -> Result<(), OcrError> {
    if path.exists() {
        tracing::info!("Using cached {:?}", path);
        return Ok(());
    }

    tracing::info!("Downloading {} (this may take a moment)...", url);
    download_file(url, path)?;
    tracing::info!("Downloaded {:?}", path);
    Ok(())
}

/// Download a file from URL to path using ureq
pub fn download_file(url: &str, path: &Path) -> Result<(), OcrError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| OcrError::InitializationError(format!("Failed to download {}: {}", url, e)))?;

    let buffer = response.into_body().read_to_vec().map_err(|e| {
        OcrError::InitializationError(format!("Failed to read response body: {}", e))
    })?;

    let mut file = File::create(path).map_err(|e| {
        OcrError::InitializationError(format!("Failed to create {:?}: {}", path, e))
    })?;
    file.write_all(&buffer)
        .map_err(|e| OcrError::InitializationError(format!("Failed to write {:?}: {}", path, e)))?;

    Ok(())
}
