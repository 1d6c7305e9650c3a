//! Tesseract command-line engine
//!
//! Runs the `tesseract` executable on a temporary PNG and reads the text from
//! its stdout. Nothing is linked; the executable only has to exist when the
//! first image is recognized.

use crate::config::OcrConfig;
use crate::engine::{OcrEngine, OcrResult};
use crate::error::OcrError;
use image::{GrayImage, ImageFormat};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

/// Tesseract invoked as an external process
pub struct TesseractCliEngine {
    command: PathBuf,
    language: String,
    oem: u8,
    psm: u8,
    tessdata_path: Option<PathBuf>,
}

impl TesseractCliEngine {
    pub fn new(config: &OcrConfig) -> Self {
        tracing::info!(
            "Tesseract CLI engine configured (command: {:?}, language: {}, oem: {}, psm: {})",
            config.tesseract_cmd,
            config.language,
            config.oem,
            config.psm
        );

        Self {
            command: config.tesseract_cmd.clone(),
            language: config.language.clone(),
            oem: config.oem,
            psm: config.psm,
            tessdata_path: config.tessdata_path.clone(),
        }
    }

    fn build_command(&self, input: &std::path::Path) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.arg(input)
            .arg("stdout")
            .args(["-l", &self.language])
            .args(["--oem", &self.oem.to_string()])
            .args(["--psm", &self.psm.to_string()]);
        if let Some(tessdata) = &self.tessdata_path {
            cmd.arg("--tessdata-dir").arg(tessdata);
        }
        cmd
    }
}

impl OcrEngine for TesseractCliEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn description(&self) -> &'static str {
        "Tesseract through its command-line executable"
    }

    fn recognize(&self, image: &GrayImage) -> Result<OcrResult, OcrError> {
        let input = tempfile::Builder::new()
            .prefix("plate-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::ProcessingError(format!("Failed to create temp file: {}", e)))?;
        image
            .save_with_format(input.path(), ImageFormat::Png)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to write bitmap: {}", e)))?;

        tracing::debug!(
            "Running {:?} on {}x{} bitmap",
            self.command,
            image.width(),
            image.height()
        );

        let output = self
            .build_command(input.path())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    OcrError::EngineNotFound(self.command.display().to_string())
                }
                _ => OcrError::ProcessingError(format!(
                    "Failed to run {}: {}",
                    self.command.display(),
                    e
                )),
            })?;

        if !output.status.success() {
            return Err(OcrError::ProcessingError(format!(
                "{} exited with {}: {}",
                self.command.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(OcrResult {
            text: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            confidence: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn config_with(cmd: &str) -> OcrConfig {
        OcrConfig {
            tesseract_cmd: PathBuf::from(cmd),
            ..OcrConfig::default()
        }
    }

    #[test]
    fn test_missing_executable() {
        let engine = TesseractCliEngine::new(&config_with("/nonexistent/bin/tesseract"));
        let result = engine.recognize(&GrayImage::from_pixel(10, 10, Luma([255])));
        assert!(matches!(result, Err(OcrError::EngineNotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_passes_single_line_mode() {
        // `echo` prints the arguments it was given
        let engine = TesseractCliEngine::new(&config_with("echo"));
        let result = engine
            .recognize(&GrayImage::from_pixel(10, 10, Luma([255])))
            .unwrap();
        assert!(
            result.text.ends_with("stdout -l eng --oem 3 --psm 7"),
            "unexpected arguments: {}",
            result.text
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_executable() {
        let engine = TesseractCliEngine::new(&config_with("false"));
        let result = engine.recognize(&GrayImage::from_pixel(10, 10, Luma([255])));
        assert!(matches!(result, Err(OcrError::ProcessingError(_))));
    }
}
