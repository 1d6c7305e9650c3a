use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::preprocessing::steps::{grayscale, threshold};
use image::RgbImage;

/// Binarize the plate with Otsu's threshold and read it as one text line
/// Returns the trimmed text, which may be empty
pub fn recognize_text(plate: &RgbImage, engine: &dyn OcrEngine) -> Result<String, OcrError> {
    let gray = grayscale::apply(plate);
    let (level, binary) = threshold::apply(&gray);
    tracing::debug!("Otsu level {} for {}x{} plate", level, plate.width(), plate.height());

    let result = engine.recognize(&binary)?;
    if let Some(confidence) = result.confidence {
        tracing::debug!("{} confidence {:.2}", engine.name(), confidence);
    }
    Ok(result.text.trim().to_string())
}
