//! Showing a result image to the user
//!
//! The pipelines only talk to the `Preview` trait. The binary uses
//! `SystemViewer`, which hands the image to the desktop's default viewer and
//! waits for Enter; tests and `--no-preview` runs use `Headless`.

use crate::error::PreviewError;
use image::{DynamicImage, ImageFormat};
use std::io::BufRead;
use std::process::{Child, Command, ExitStatus};

/// Something that can present an image and block until the user is done
pub trait Preview {
    fn show(&self, title: &str, image: &DynamicImage) -> Result<(), PreviewError>;
}

/// Opens the image with the platform viewer and waits for Enter on stdin
#[derive(Debug, Default)]
pub struct SystemViewer;

impl SystemViewer {
    fn viewer_command() -> (&'static str, &'static [&'static str]) {
        const NO_ARGS: &[&str] = &[];
        const WINDOWS_START: &[&str] = &["/C", "start", ""];

        if cfg!(target_os = "macos") {
            ("open", NO_ARGS)
        } else if cfg!(target_os = "windows") {
            ("cmd", WINDOWS_START)
        } else {
            ("xdg-open", NO_ARGS)
        }
    }
}

impl Preview for SystemViewer {
    fn show(&self, title: &str, image: &DynamicImage) -> Result<(), PreviewError> {
        let file = tempfile::Builder::new()
            .prefix("collage-plate-preview-")
            .suffix(".png")
            .tempfile()?;
        image.save_with_format(file.path(), ImageFormat::Png)?;

        let (viewer, args) = Self::viewer_command();
        tracing::info!("Showing '{}' ({}x{})", title, image.width(), image.height());
        let child = Command::new(viewer)
            .args(args)
            .arg(file.path())
            .spawn()
            .map_err(|source| PreviewError::Launch {
                viewer: viewer.to_string(),
                source,
            })?;

        eprintln!("{}: press Enter to continue", title);
        let mut line = String::new();
        let answered = std::io::stdin().lock().read_line(&mut line);
        reap(viewer, child);
        answered?;

        // The temp file is removed when `file` drops
        Ok(())
    }
}

/// Wait for a launched viewer so it does not linger as a zombie
fn reap(viewer: &str, mut child: Child) -> Option<ExitStatus> {
    match child.wait() {
        Ok(status) => {
            if !status.success() {
                tracing::warn!("Viewer '{}' exited with {}", viewer, status);
            }
            Some(status)
        }
        Err(e) => {
            tracing::warn!("Failed to wait for viewer '{}': {}", viewer, e);
            None
        }
    }
}

/// Skips presentation entirely
#[derive(Debug, Default)]
pub struct Headless;

impl Preview for Headless {
    fn show(&self, title: &str, image: &DynamicImage) -> Result<(), PreviewError> {
        tracing::debug!(
            "Preview disabled, not showing '{}' ({}x{})",
            title,
            image.width(),
            image.height()
        );
        Ok(())
    }
}

/// Pick the preview for a run
pub fn select(enabled: bool) -> Box<dyn Preview> {
    if enabled {
        Box::new(SystemViewer)
    } else {
        Box::new(Headless)
    }
}
