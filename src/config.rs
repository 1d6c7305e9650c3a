use crate::cli::{CollageArgs, PlateArgs};
use crate::error::CollageError;
use image::Rgb;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Collage grid: `rows` rows of `cols` tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

impl GridSize {
    pub fn cells(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl FromStr for GridSize {
    type Err = String;

    /// Parses "ROWSxCOLS"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rows, cols) = parse_pair(s)?;
        Ok(Self { rows, cols })
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Target size of every collage tile, before borders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl FromStr for TileSize {
    type Err = String;

    /// Parses "WIDTHxHEIGHT"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = parse_pair(s)?;
        Ok(Self { width, height })
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn parse_pair(s: &str) -> Result<(u32, u32), String> {
    let (a, b) = s
        .to_lowercase()
        .split_once('x')
        .map(|(a, b)| (a.trim().to_string(), b.trim().to_string()))
        .ok_or_else(|| format!("expected AxB, got '{}'", s))?;
    let a = a.parse().map_err(|e| format!("invalid number '{}': {}", a, e))?;
    let b = b.parse().map_err(|e| format!("invalid number '{}': {}", b, e))?;
    Ok((a, b))
}

/// Largest collage side in pixels (the JPEG limit)
pub const MAX_COLLAGE_SIDE: u32 = 65_535;

/// Largest collage canvas in pixels
pub const MAX_COLLAGE_PIXELS: u64 = 1 << 28;

/// Collage builder configuration
#[derive(Debug, Clone)]
pub struct CollageConfig {
    /// Folder scanned for images (default `./images`)
    pub input_dir: PathBuf,
    /// Where the collage is written (default `collage.jpg`)
    pub output_path: PathBuf,
    /// Default 2x2
    pub grid: GridSize,
    /// Default 300x300
    pub tile_size: TileSize,
    /// Border thickness in pixels (default 10)
    pub border: u32,
    /// Default white
    pub border_color: Rgb<u8>,
    pub preview: bool,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./images"),
            output_path: PathBuf::from("collage.jpg"),
            grid: GridSize { rows: 2, cols: 2 },
            tile_size: TileSize {
                width: 300,
                height: 300,
            },
            border: 10,
            border_color: Rgb([255, 255, 255]),
            preview: true,
        }
    }
}

impl CollageConfig {
    pub fn validate(&self) -> Result<(), CollageError> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(CollageError::InvalidParameters(format!(
                "grid must have at least one row and column, got {}",
                self.grid
            )));
        }
        if self.tile_size.width == 0 || self.tile_size.height == 0 {
            return Err(CollageError::InvalidParameters(format!(
                "tile size must be non-zero, got {}",
                self.tile_size
            )));
        }
        self.output_size().map(|_| ())
    }

    /// Width and height of the finished collage
    ///
    /// Fails when either side overflows or exceeds `MAX_COLLAGE_SIDE`, or the
    /// canvas would hold more than `MAX_COLLAGE_PIXELS`.
    pub fn output_size(&self) -> Result<(u32, u32), CollageError> {
        let too_large = || {
            CollageError::InvalidParameters(format!(
                "collage of {} tiles of {} with a {}px border is too large",
                self.grid, self.tile_size, self.border
            ))
        };
        let side = |tile: u32, count: u32| {
            self.border
                .checked_mul(2)
                .and_then(|frame| frame.checked_add(tile))
                .and_then(|framed| framed.checked_mul(count))
                .filter(|&total| total <= MAX_COLLAGE_SIDE)
        };

        let width = side(self.tile_size.width, self.grid.cols).ok_or_else(too_large)?;
        let height = side(self.tile_size.height, self.grid.rows).ok_or_else(too_large)?;
        if u64::from(width) * u64::from(height) > MAX_COLLAGE_PIXELS {
            return Err(too_large());
        }
        Ok((width, height))
    }
}

impl From<CollageArgs> for CollageConfig {
    fn from(args: CollageArgs) -> Self {
        Self {
            input_dir: args.input_dir,
            output_path: args.output,
            grid: args.grid,
            tile_size: args.tile_size,
            border: args.border,
            border_color: args.border_color,
            preview: !args.no_preview,
        }
    }
}

/// Bilateral filter parameters (OpenCV naming)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DenoiseParams {
    /// Neighbourhood diameter in pixels
    pub diameter: u32,
    pub sigma_color: f32,
    pub sigma_space: f32,
}

impl Default for DenoiseParams {
    fn default() -> Self {
        Self {
            diameter: 11,
            sigma_color: 17.0,
            sigma_space: 17.0,
        }
    }
}

/// Canny thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeParams {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            low_threshold: 30.0,
            high_threshold: 200.0,
        }
    }
}

/// Plate contour search parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourParams {
    /// Only the largest contours by area are examined
    pub max_candidates: usize,
    /// Polygon approximation tolerance as a fraction of the perimeter
    pub epsilon_ratio: f64,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            max_candidates: 10,
            epsilon_ratio: 0.02,
        }
    }
}

/// OCR engine configuration
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Engine name, see `engines::available()`
    pub engine: String,
    /// Tesseract executable for the command-line engine
    pub tesseract_cmd: PathBuf,
    pub language: String,
    /// OCR engine mode: 3 = legacy + LSTM, whatever is available
    pub oem: u8,
    /// Page segmentation mode: 7 = single text line
    pub psm: u8,
    pub tessdata_path: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: "tesseract".to_string(),
            tesseract_cmd: PathBuf::from("tesseract"),
            language: "eng".to_string(),
            oem: 3,
            psm: 7,
            tessdata_path: None,
        }
    }
}

/// Plate recognizer configuration
#[derive(Debug, Clone)]
pub struct PlateConfig {
    /// Default `./images/cars.jpg`
    pub image_path: PathBuf,
    pub denoise: DenoiseParams,
    pub edges: EdgeParams,
    pub contour: ContourParams,
    pub ocr: OcrConfig,
    /// Contour overlay color (default green)
    pub annotation_color: Rgb<u8>,
    pub annotation_thickness: u32,
    pub preview: bool,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("./images/cars.jpg"),
            denoise: DenoiseParams::default(),
            edges: EdgeParams::default(),
            contour: ContourParams::default(),
            ocr: OcrConfig::default(),
            annotation_color: Rgb([0, 255, 0]),
            annotation_thickness: 3,
            preview: true,
        }
    }
}

impl From<PlateArgs> for PlateConfig {
    fn from(args: PlateArgs) -> Self {
        Self {
            image_path: args.image,
            edges: EdgeParams {
                low_threshold: args.canny_low,
                high_threshold: args.canny_high,
            },
            contour: ContourParams {
                max_candidates: args.max_candidates,
                ..ContourParams::default()
            },
            ocr: OcrConfig {
                engine: args.engine,
                tesseract_cmd: args.tesseract_cmd,
                language: args.language,
                tessdata_path: args.tessdata_path,
                ..OcrConfig::default()
            },
            preview: !args.no_preview,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_parses() {
        assert_eq!("3x4".parse::<GridSize>().unwrap(), GridSize { rows: 3, cols: 4 });
        assert_eq!("2X5".parse::<GridSize>().unwrap(), GridSize { rows: 2, cols: 5 });
        assert!("3".parse::<GridSize>().is_err());
        assert!("ax2".parse::<GridSize>().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_grid() {
        let config = CollageConfig {
            grid: GridSize { rows: 0, cols: 2 },
            ..CollageConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CollageError::InvalidParameters(_))
        ));
        assert!(CollageConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_collage() {
        let huge_border = CollageConfig {
            border: 3_000_000_000,
            ..CollageConfig::default()
        };
        assert!(matches!(
            huge_border.validate(),
            Err(CollageError::InvalidParameters(_))
        ));

        let wide_tiles = CollageConfig {
            tile_size: TileSize {
                width: u32::MAX / 2,
                height: 10,
            },
            ..CollageConfig::default()
        };
        assert!(wide_tiles.validate().is_err());

        let too_many_pixels = CollageConfig {
            grid: GridSize { rows: 1, cols: 1 },
            tile_size: TileSize {
                width: 60_000,
                height: 60_000,
            },
            border: 0,
            ..CollageConfig::default()
        };
        assert!(too_many_pixels.validate().is_err());
    }

    #[test]
    fn test_output_size_includes_borders() {
        assert_eq!(CollageConfig::default().output_size().unwrap(), (640, 640));
        let config = CollageConfig {
            grid: GridSize { rows: 2, cols: 3 },
            tile_size: TileSize {
                width: 50,
                height: 40,
            },
            border: 5,
            ..CollageConfig::default()
        };
        assert_eq!(config.output_size().unwrap(), (180, 100));
    }

    #[test]
    fn test_plate_defaults() {
        let config = PlateConfig::default();
        assert_eq!(config.edges.low_threshold, 30.0);
        assert_eq!(config.edges.high_threshold, 200.0);
        assert_eq!(config.contour.max_candidates, 10);
        assert_eq!(config.ocr.psm, 7);
        assert_eq!(config.ocr.oem, 3);
    }
}
