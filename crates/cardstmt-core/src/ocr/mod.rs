//! OCR fallback for image-only statements.

mod stub;
mod tesseract;

pub use stub::StubEngine;
pub use tesseract::TesseractEngine;

use image::DynamicImage;

use crate::error::OcrError;

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// Trait for OCR engine implementations.
///
/// Engines receive one page image at a time; the caller stitches page
/// texts back together in page order.
pub trait OcrEngine {
    /// Recognize the text in a page image.
    fn recognize(&self, image: &DynamicImage) -> Result<String>;

    /// Engine name for logs and result metadata.
    fn name(&self) -> &str;
}
