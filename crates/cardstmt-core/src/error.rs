//! Error types for the cardstmt-core library.

use thiserror::Error;

/// Main error type for the cardstmt library.
#[derive(Error, Debug)]
pub enum CardstmtError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Statement extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
///
/// These cover the unreadable-document cases: a failed parse, an encrypted
/// file, or a document with no pages. They are fatal for the affected file
/// but never for a batch run.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to extract images from PDF.
    #[error("failed to extract images: {0}")]
    ImageExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR engine could not be invoked at all.
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The OCR engine ran but failed to recognize the image.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// I/O error while staging image data for the engine.
    #[error("OCR I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to statement field extraction.
///
/// Missing individual fields are not errors; they become absent values
/// with zero confidence. Only whole-document outcomes live here.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No known issuer could be detected in the text.
    #[error("unsupported issuer")]
    UnsupportedIssuer,

    /// The document yielded no usable text via either path.
    #[error("no text could be recovered from the document")]
    NoText,
}

/// Result type for the cardstmt library.
pub type Result<T> = std::result::Result<T, CardstmtError>;
