//! OCR engine implementations
//!
//! The Tesseract command-line engine is always built. In-process engines are
//! conditionally compiled based on feature flags.

pub mod tesseract;

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

#[cfg(feature = "engine-leptess")]
pub mod leptess;

#[cfg(any(feature = "engine-ocrs", feature = "engine-leptess"))]
mod download;

use crate::config::OcrConfig;
use crate::engine::OcrEngine;
use crate::error::OcrError;

/// Names of the engines compiled into this build
pub fn available() -> Vec<&'static str> {
    let mut names = vec!["tesseract"];
    #[cfg(feature = "engine-leptess")]
    names.push("leptess");
    #[cfg(feature = "engine-ocrs")]
    names.push("ocrs");
    names
}

/// Create the engine named by `config.engine`
pub fn create(config: &OcrConfig) -> Result<Box<dyn OcrEngine>, OcrError> {
    let engine: Box<dyn OcrEngine> = match config.engine.as_str() {
        "tesseract" => Box::new(tesseract::TesseractCliEngine::new(config)),
        #[cfg(feature = "engine-leptess")]
        "leptess" => Box::new(leptess::LeptessEngine::new(config)?),
        #[cfg(feature = "engine-ocrs")]
        "ocrs" => Box::new(ocrs::OcrsEngine::new()?),
        other => {
            return Err(OcrError::UnknownEngine {
                name: other.to_string(),
                available: available().join(", "),
            })
        }
    };

    tracing::info!("Using OCR engine '{}': {}", engine.name(), engine.description());
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tesseract_always_available() {
        assert!(available().contains(&"tesseract"));
        let engine = create(&OcrConfig::default()).unwrap();
        assert_eq!(engine.name(), "tesseract");
    }

    #[test]
    fn test_unknown_engine() {
        let config = OcrConfig {
            engine: "nope".to_string(),
            ..OcrConfig::default()
        };
        let err = create(&config).err().unwrap();
        assert!(matches!(err, OcrError::UnknownEngine { .. }));
        assert!(err.to_string().contains("tesseract"));
    }
}
