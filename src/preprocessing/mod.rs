//! Image processing steps shared by the collage and plate pipelines

pub mod pipeline;
pub mod steps;

pub use pipeline::{StepTimer, StepTiming};
