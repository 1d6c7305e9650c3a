//! Individual image processing steps

pub mod border;
pub mod denoise;
pub mod edges;
pub mod grayscale;
pub mod resize;
pub mod threshold;
