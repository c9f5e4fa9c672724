//! Tesseract-backed OCR engine.
//!
//! Shells out to the `tesseract` binary rather than linking it, so the
//! dependency stays optional at runtime and the system installation
//! (with its trained data) is used as-is.

use std::process::Command;

use image::DynamicImage;
use tracing::{debug, warn};

use super::{OcrEngine, Result};
use crate::error::OcrError;
use crate::models::OcrConfig;

/// OCR engine that invokes the system tesseract binary per page.
pub struct TesseractEngine {
    command: String,
    language: String,
    dpi: u32,
}

impl TesseractEngine {
    /// Engine with default settings (`tesseract`, English, 300 dpi).
    pub fn new() -> Self {
        Self::from_config(&OcrConfig::default())
    }

    /// Engine configured from the OCR section of the config file.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            language: config.language.clone(),
            dpi: config.dpi,
        }
    }

    /// Probe whether the configured binary can be executed.
    pub fn is_available(&self) -> bool {
        match Command::new(&self.command).arg("--version").output() {
            Ok(output) => output.status.success(),
            Err(_) => false,
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<String> {
        // Stage the page as a PNG; tesseract reads files, not pipes.
        let staged = tempfile::Builder::new()
            .prefix("cardstmt-page-")
            .suffix(".png")
            .tempfile()?;
        image
            .save_with_format(staged.path(), image::ImageFormat::Png)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        debug!(
            "running {} on {} ({}x{})",
            self.command,
            staged.path().display(),
            image.width(),
            image.height()
        );

        let output = Command::new(&self.command)
            .arg(staged.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--dpi")
            .arg(self.dpi.to_string())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    OcrError::EngineUnavailable(self.command.clone())
                } else {
                    OcrError::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("tesseract exited with {}: {}", output.status, stderr.trim());
            return Err(OcrError::Recognition(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
