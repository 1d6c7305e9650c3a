use crate::error::OcrError;
use image::GrayImage;

/// OCR processing result
#[derive(Debug, Clone)]
pub struct OcrResult {
    pub text: String,
    /// 0.0-1.0 when the engine reports one
    pub confidence: Option<f32>,
}

/// Trait that all OCR engines must implement
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "tesseract", "ocrs")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Read a single line of text from a binarized bitmap
    fn recognize(&self, image: &GrayImage) -> Result<OcrResult, OcrError>;
}
