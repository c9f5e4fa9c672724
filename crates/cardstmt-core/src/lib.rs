//! Core library for credit-card statement field extraction.
//!
//! This crate provides:
//! - PDF processing (text-layer and embedded image extraction)
//! - OCR fallback through the tesseract CLI for scanned statements
//! - Issuer detection and per-issuer field parsers
//! - Statement data models with confidence scoring

pub mod error;
pub mod models;
pub mod pdf;
pub mod ocr;
pub mod statement;

pub use error::{CardstmtError, ExtractionError, OcrError, PdfError, Result};
pub use models::{BillingPeriod, CardstmtConfig, Issuer, StatementRecord, TextSource};
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
pub use ocr::{OcrEngine, StubEngine, TesseractEngine};
pub use statement::{detect_issuer, parse_statement, ParseOutcome, StatementProcessor};
