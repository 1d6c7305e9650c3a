use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Failed to initialize OCR engine: {0}")]
    InitializationError(String),

    #[error("OCR executable not found: {0}")]
    EngineNotFound(String),

    #[error("Failed to process image: {0}")]
    ProcessingError(String),

    #[error("Unknown OCR engine '{name}' (available: {available})")]
    UnknownEngine { name: String, available: String },
}

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Failed to encode preview image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Preview I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to launch image viewer '{viewer}': {source}")]
    Launch {
        viewer: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum CollageError {
    #[error("cannot read folder {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no images found in {}", path.display())]
    NoImages { path: PathBuf },

    #[error("not enough images: need {required}, have {available}")]
    InsufficientImages { required: usize, available: usize },

    #[error("invalid collage parameters: {0}")]
    InvalidParameters(String),

    #[error("cannot save collage to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Preview(#[from] PreviewError),
}

#[derive(Error, Debug)]
pub enum PlateError {
    #[error("cannot load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("plate not found")]
    PlateNotFound,

    #[error("error cropping plate")]
    Crop,

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error(transparent)]
    Preview(#[from] PreviewError),
}
