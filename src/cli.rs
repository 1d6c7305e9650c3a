use crate::config::{GridSize, TileSize};
use clap::{Args, Parser, Subcommand};
use image::Rgb;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "collage-plate")]
#[command(about = "Grid collage builder and license plate recognizer")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tile the images of a folder into a bordered grid
    Collage(CollageArgs),
    /// Locate a license plate in a photo and read its text
    Plate(PlateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CollageArgs {
    /// Folder to read .png/.jpg/.jpeg images from
    #[arg(long, env = "COLLAGE_INPUT_DIR", default_value = "./images")]
    pub input_dir: PathBuf,

    /// Output file; the format follows the extension
    #[arg(long, short, default_value = "collage.jpg")]
    pub output: PathBuf,

    /// Grid as ROWSxCOLS
    #[arg(long, default_value = "2x2")]
    pub grid: GridSize,

    /// Size of every tile as WIDTHxHEIGHT
    #[arg(long, default_value = "300x300")]
    pub tile_size: TileSize,

    /// Border thickness in pixels around each tile
    #[arg(long, default_value = "10")]
    pub border: u32,

    /// Border color as R,G,B
    #[arg(long, default_value = "255,255,255", value_parser = parse_rgb)]
    pub border_color: Rgb<u8>,

    /// Skip the interactive preview
    #[arg(long)]
    pub no_preview: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PlateArgs {
    /// Photo containing the license plate
    #[arg(default_value = "./images/cars.jpg")]
    pub image: PathBuf,

    /// OCR engine name (see --help for the compiled-in list)
    #[arg(long, env = "OCR_ENGINE", default_value = "tesseract")]
    pub engine: String,

    /// Tesseract executable used by the "tesseract" engine
    #[arg(long, env = "TESSERACT_CMD", default_value = "tesseract")]
    pub tesseract_cmd: PathBuf,

    /// Language for OCR (e.g., "eng", "deu", "ukr")
    #[arg(long, default_value = "eng")]
    pub language: String,

    /// Path to tessdata directory (uses TESSDATA_PREFIX env var if not set)
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata_path: Option<PathBuf>,

    /// Canny low threshold
    #[arg(long, default_value = "30")]
    pub canny_low: f32,

    /// Canny high threshold
    #[arg(long, default_value = "200")]
    pub canny_high: f32,

    /// Number of largest contours examined for a plate
    #[arg(long, default_value = "10")]
    pub max_candidates: usize,

    /// Skip the interactive preview
    #[arg(long)]
    pub no_preview: bool,

    /// Print the reading as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse "R,G,B" into a color
pub fn parse_rgb(s: &str) -> Result<Rgb<u8>, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected R,G,B, got '{}'", s));
    }

    let mut channels = [0u8; 3];
    for (channel, part) in channels.iter_mut().zip(&parts) {
        *channel = part
            .parse()
            .map_err(|e| format!("invalid color component '{}': {}", part, e))?;
    }
    Ok(Rgb(channels))
}
