//! Runtime configuration for the extraction pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CardstmtError, Result};

/// Top-level configuration, grouped by pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardstmtConfig {
    #[serde(default)]
    pub pdf: PdfConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// PDF text-layer acquisition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Minimum trimmed text length before the text layer is trusted.
    /// Shorter text is treated as image-only and routed to OCR.
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,
    /// Upper bound on pages scanned per document.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

/// OCR fallback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Disable to fail fast on image-only documents.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Tesseract binary to invoke.
    #[serde(default = "default_ocr_command")]
    pub command: String,
    /// Recognition language passed to tesseract `-l`.
    #[serde(default = "default_ocr_language")]
    pub language: String,
    /// DPI hint passed to tesseract `--dpi`.
    #[serde(default = "default_ocr_dpi")]
    pub dpi: u32,
}

/// Output sink settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Append-only CSV ledger of successful parses.
    #[serde(default = "default_results_csv")]
    pub results_csv: PathBuf,
}

fn default_min_text_length() -> usize {
    50
}

fn default_max_pages() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_ocr_command() -> String {
    "tesseract".to_string()
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

fn default_ocr_dpi() -> u32 {
    300
}

fn default_results_csv() -> PathBuf {
    PathBuf::from("outputs/results.csv")
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: default_min_text_length(),
            max_pages: default_max_pages(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            command: default_ocr_command(),
            language: default_ocr_language(),
            dpi: default_ocr_dpi(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_csv: default_results_csv(),
        }
    }
}

impl CardstmtConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CardstmtError::Config(format!("invalid config {}: {e}", path.display())))
    }

    /// Write configuration as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CardstmtError::Config(format!("serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
