//! OCRS engine implementation
//!
//! Pure Rust OCR engine using the ocrs library. No system dependencies required.
//! Downloads neural network models automatically on first use.

use super::download::{cache_dir, ensure_downloaded};
use crate::engine::{OcrEngine, OcrResult};
use crate::error::OcrError;
use image::{DynamicImage, GrayImage};
use ocrs::{DecodeMethod, ImageSource, OcrEngine as OcrsOcrEngine, OcrEngineParams};
use rten::Model;
use std::path::PathBuf;

/// Default model URLs from the ocrs project
const DETECTION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-detection.rten";
const RECOGNITION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-recognition.rten";

/// OCR Engine wrapping the ocrs library
pub struct OcrsEngine {
    engine: OcrsOcrEngine,
}

impl OcrsEngine {
    /// Load the models, downloading them if needed
    pub fn new() -> Result<Self, OcrError> {
        tracing::info!("Initializing ocrs OCR engine...");

        let detection_model = load_model(DETECTION_MODEL_URL, "text-detection.rten")?;
        let recognition_model = load_model(RECOGNITION_MODEL_URL, "text-recognition.rten")?;

        let engine = OcrsOcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            decode_method: DecodeMethod::Greedy,
            ..Default::default()
        })
        .map_err(|e| {
            OcrError::InitializationError(format!("Failed to create OCR engine: {}", e))
        })?;

        tracing::info!("ocrs engine initialized successfully");

        Ok(Self { engine })
    }
}

impl OcrEngine for OcrsEngine {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn description(&self) -> &'static str {
        "Pure Rust OCR engine - no system dependencies required"
    }

    fn recognize(&self, image: &GrayImage) -> Result<OcrResult, OcrError> {
        // ImageSource::from_bytes expects HWC RGB
        let rgb_img = DynamicImage::ImageLuma8(image.clone()).into_rgb8();
        let dimensions = rgb_img.dimensions();

        let img_source = ImageSource::from_bytes(rgb_img.as_raw(), dimensions).map_err(|e| {
            OcrError::ProcessingError(format!("Failed to create image source: {}", e))
        })?;

        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to prepare input: {}", e)))?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to detect words: {}", e)))?;

        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);

        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to recognize text: {}", e)))?;

        // A plate is read as one line: join whatever lines were found
        let text = line_texts
            .iter()
            .filter_map(|line| line.as_ref())
            .flat_map(|line| line.words().map(|word| word.to_string()).collect::<Vec<_>>())
            .collect::<Vec<_>>()
            .join(" ");

        let confidence = plate_text_confidence(&text);

        Ok(OcrResult {
            text,
            confidence: Some(confidence),
        })
    }
}

fn load_model(url: &str, filename: &str) -> Result<Model, OcrError> {
    let path: PathBuf = cache_dir("models")?.join(filename);
    ensure_downloaded(url, &path)?;
    Model::load_file(&path).map_err(|e| {
        OcrError::InitializationError(format!("Failed to load model {}: {}", filename, e))
    })
}

/// Confidence score from text heuristics
///
/// ocrs has no per-character confidence. Plate text is short and
/// alphanumeric, so score the alphanumeric share, the length and runs of a
/// repeated character.
fn plate_text_confidence(text: &str) -> f32 {
    let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.is_empty() {
        return 0.0;
    }

    let alnum = chars.iter().filter(|c| c.is_alphanumeric()).count();
    let alnum_score = alnum as f32 / chars.len() as f32;

    let length_score = match chars.len() {
        1..=2 => 0.3,
        3 => 0.7,
        4..=10 => 1.0,
        _ => 0.6,
    };

    let confidence = 0.6 * alnum_score + 0.2 * length_score + 0.2 * detect_repetition(&chars);
    confidence.clamp(0.0, 1.0)
}

/// Detect repeated character sequences.
///
/// Patterns like "1111111" or "####" often indicate OCR confusion.
fn detect_repetition(chars: &[char]) -> f32 {
    let mut max_repeat = 1;
    let mut current = 1;
    for pair in chars.windows(2) {
        if pair[0] == pair[1] {
            current += 1;
            max_repeat = max_repeat.max(current);
        } else {
            current = 1;
        }
    }

    match max_repeat {
        1..=3 => 1.0,
        4..=5 => 0.6,
        _ => 0.2,
    }
}
