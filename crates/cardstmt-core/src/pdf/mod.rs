//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;
use image::DynamicImage;

/// Classification of a statement PDF's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains a usable embedded text layer.
    Text,
    /// Contains only images (scanned statement).
    Image,
    /// Contains both a text layer and images.
    Hybrid,
    /// Empty or unreadable.
    Empty,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Classify the PDF given the minimum trusted text-layer length.
    fn analyze(&self, min_text_length: usize) -> PdfType;

    /// Extract the embedded text layer of the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract embedded images from a single page (1-indexed).
    fn page_images(&self, page: u32) -> Result<Vec<DynamicImage>>;

    /// Extract every embedded image in the document, in object order.
    fn document_images(&self) -> Vec<DynamicImage>;
}
