//! Grid collage builder and license plate recognizer
//!
//! Two independent pipelines sharing one set of image processing steps:
//! [`collage`] tiles the images of a folder into a bordered grid, and
//! [`plate`] finds the largest quadrilateral in a photo and reads it with an
//! [`engine::OcrEngine`].

pub mod cli;
pub mod collage;
pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod plate;
pub mod preprocessing;
pub mod preview;
