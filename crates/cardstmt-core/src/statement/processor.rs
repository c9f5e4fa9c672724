//! End-to-end statement processing, from PDF bytes to a parsed record.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::dispatcher::{parse_statement, ParseOutcome};
use crate::error::{ExtractionError, OcrError, Result};
use crate::models::{CardstmtConfig, TextSource};
use crate::ocr::{OcrEngine, TesseractEngine};
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Whether the embedded text layer is too thin to trust.
pub fn needs_ocr(text: &str, min_text_length: usize) -> bool {
    text.trim().len() < min_text_length
}

/// Statement processor combining text-layer extraction with OCR fallback.
///
/// The text layer is always tried first. OCR runs only when the layer is
/// shorter than the configured threshold and an engine is attached.
pub struct StatementProcessor {
    ocr: Option<Box<dyn OcrEngine>>,
    min_text_length: usize,
    max_pages: usize,
}

impl StatementProcessor {
    /// Processor with default thresholds and no OCR engine attached.
    pub fn new() -> Self {
        let defaults = CardstmtConfig::default();
        Self {
            ocr: None,
            min_text_length: defaults.pdf.min_text_length,
            max_pages: defaults.pdf.max_pages,
        }
    }

    /// Build a processor from configuration, attaching tesseract when
    /// OCR is enabled.
    pub fn from_config(config: &CardstmtConfig) -> Self {
        let ocr: Option<Box<dyn OcrEngine>> = if config.ocr.enabled {
            let engine = TesseractEngine::from_config(&config.ocr);
            if !engine.is_available() {
                warn!(
                    "{} not found, image-only statements will fail",
                    config.ocr.command
                );
            }
            Some(Box::new(engine))
        } else {
            None
        };
        Self {
            ocr,
            min_text_length: config.pdf.min_text_length,
            max_pages: config.pdf.max_pages,
        }
    }

    /// Attach an OCR engine.
    pub fn with_ocr(mut self, engine: Box<dyn OcrEngine>) -> Self {
        self.ocr = Some(engine);
        self
    }

    /// Set the minimum trusted text-layer length.
    pub fn with_min_text_length(mut self, chars: usize) -> Self {
        self.min_text_length = chars;
        self
    }

    /// Set the page limit for OCR.
    pub fn with_max_pages(mut self, pages: usize) -> Self {
        self.max_pages = pages;
        self
    }

    /// Process a statement PDF on disk.
    pub fn process_path(&self, path: impl AsRef<Path>) -> Result<ParseOutcome> {
        let path = path.as_ref();
        info!("processing {}", path.display());
        let data = std::fs::read(path)?;
        self.process_bytes(&data)
    }

    /// Process statement PDF bytes.
    pub fn process_bytes(&self, data: &[u8]) -> Result<ParseOutcome> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let mut extractor = PdfExtractor::new();
        extractor.load(data)?;

        let text = match extractor.extract_text() {
            Ok(text) => text,
            Err(e) => {
                warn!("text layer extraction failed: {e}");
                warnings.push(format!("text layer extraction failed: {e}"));
                String::new()
            }
        };

        let (final_text, source, engine_name) = if !needs_ocr(&text, self.min_text_length) {
            debug!("using embedded text layer ({} chars)", text.trim().len());
            (text, TextSource::TextLayer, None)
        } else if let Some(engine) = &self.ocr {
            let pdf_type = extractor.analyze(self.min_text_length);
            info!(
                "text layer below {} chars ({:?} document), running {} OCR",
                self.min_text_length,
                pdf_type,
                engine.name()
            );
            let ocr_text = self.run_ocr(&extractor, engine.as_ref(), &mut warnings)?;
            if ocr_text.trim().is_empty() {
                if text.trim().is_empty() {
                    return Err(ExtractionError::NoText.into());
                }
                warnings.push("OCR produced no text, using the short text layer".to_string());
                (text, TextSource::TextLayer, None)
            } else {
                let name = engine.name().to_string();
                (ocr_text, TextSource::Ocr, Some(name))
            }
        } else {
            if text.trim().is_empty() {
                return Err(ExtractionError::NoText.into());
            }
            warnings.push(format!(
                "text layer below {} chars and OCR is disabled",
                self.min_text_length
            ));
            (text, TextSource::TextLayer, None)
        };

        let mut outcome = parse_statement(&final_text);
        outcome.source = source;
        outcome.ocr_engine = engine_name;
        if !warnings.is_empty() {
            warnings.append(&mut outcome.warnings);
            outcome.warnings = warnings;
        }
        outcome.processing_time_ms = start.elapsed().as_millis() as u64;
        Ok(outcome)
    }

    /// Parse already-extracted statement text.
    pub fn process_text(&self, text: &str) -> ParseOutcome {
        let start = Instant::now();
        let mut outcome = parse_statement(text);
        outcome.source = TextSource::TextLayer;
        outcome.processing_time_ms = start.elapsed().as_millis() as u64;
        outcome
    }

    fn run_ocr(
        &self,
        extractor: &PdfExtractor,
        engine: &dyn OcrEngine,
        warnings: &mut Vec<String>,
    ) -> Result<String> {
        let page_count = extractor.page_count();
        let last_page = page_count.min(self.max_pages as u32);
        if page_count > last_page {
            warnings.push(format!(
                "statement has {page_count} pages, OCR limited to the first {last_page}"
            ));
        }

        let mut images = Vec::new();
        for page in 1..=last_page {
            match extractor.page_images(page) {
                Ok(mut page_images) => images.append(&mut page_images),
                Err(e) => {
                    warn!("image extraction failed on page {page}: {e}");
                    warnings.push(format!("image extraction failed on page {page}: {e}"));
                }
            }
        }
        if images.is_empty() {
            // Some producers keep image objects outside the page
            // resource tree; scan the whole document in that case.
            images = extractor.document_images();
        }
        debug!("running OCR over {} images", images.len());

        let mut page_texts = Vec::new();
        for (index, image) in images.iter().enumerate() {
            match engine.recognize(image) {
                Ok(text) => page_texts.push(text),
                Err(e @ OcrError::EngineUnavailable(_)) => return Err(e.into()),
                Err(e) => {
                    warn!("OCR failed on image {}: {e}", index + 1);
                    warnings.push(format!("OCR failed on image {}: {e}", index + 1));
                }
            }
        }

        Ok(page_texts.join("\n\n"))
    }
}

impl Default for StatementProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CardstmtError;
    use crate::models::Issuer;
    use crate::ocr::StubEngine;
    use lopdf::dictionary;
    use lopdf::{Document, Object, Stream};
    use pretty_assertions::assert_eq;

    /// Build a single-page PDF whose text layer holds the given lines.
    fn text_pdf(lines: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut ops = String::from("BT /F1 12 Tf 14 TL 50 750 Td\n");
        for line in lines {
            let escaped = line
                .replace('\\', "\\\\")
                .replace('(', "\\(")
                .replace(')', "\\)");
            ops.push_str(&format!("({escaped}) Tj T*\n"));
        }
        ops.push_str("ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, ops.into_bytes()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });

        finish_pdf(doc, page_id)
    }

    /// Build a single-page PDF whose only content is a raw grayscale
    /// image XObject, mimicking a scanned statement.
    fn scanned_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.4");

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 8,
                "Height" => 8,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            vec![200u8; 64],
        ));

        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            b"q 612 0 0 792 0 0 cm /Im0 Do Q".to_vec(),
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });

        finish_pdf(doc, page_id)
    }

    fn finish_pdf(mut doc: Document, page_id: lopdf::ObjectId) -> Vec<u8> {
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        });
        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
            dict.set("Parent", pages_id);
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    const ONECARD_LINES: [&str; 6] = [
        "OneCard Statement",
        "Card ending 1234",
        "Billing Period: 14 Aug 2025 - 13 Sep 2025",
        "Payment Due Date: 03 Oct 2025",
        "Total Due: Rs. 25,000.00",
        "Minimum Due: Rs. 5,000.00",
    ];

    #[test]
    fn test_text_layer_statement() {
        let pdf = text_pdf(&ONECARD_LINES);
        let processor = StatementProcessor::new();

        let outcome = processor.process_bytes(&pdf).unwrap();

        assert_eq!(outcome.source, TextSource::TextLayer);
        assert_eq!(outcome.ocr_engine, None);
        assert_eq!(outcome.record.issuer, Issuer::OneCard);
        assert_eq!(outcome.record.card_last4.as_deref(), Some("1234"));
        assert_eq!(outcome.record.new_balance, Some(25000.0));
        assert_eq!(outcome.record.confidence, 1.0);
    }

    #[test]
    fn test_scanned_statement_goes_through_ocr() {
        let pdf = scanned_pdf();
        let stub = StubEngine::new(vec![ONECARD_LINES.join("\n")]);
        let processor = StatementProcessor::new().with_ocr(Box::new(stub));

        let outcome = processor.process_bytes(&pdf).unwrap();

        assert_eq!(outcome.source, TextSource::Ocr);
        assert_eq!(outcome.ocr_engine.as_deref(), Some("stub"));
        assert_eq!(outcome.record.issuer, Issuer::OneCard);
        assert_eq!(outcome.record.minimum_due, Some(5000.0));
    }

    #[test]
    fn test_scanned_statement_without_ocr_fails() {
        let pdf = scanned_pdf();
        let processor = StatementProcessor::new();

        let result = processor.process_bytes(&pdf);
        assert!(matches!(
            result,
            Err(CardstmtError::Extraction(ExtractionError::NoText))
        ));
    }

    #[test]
    fn test_empty_ocr_output_is_no_text() {
        let pdf = scanned_pdf();
        let stub = StubEngine::new(Vec::<String>::new());
        let processor = StatementProcessor::new().with_ocr(Box::new(stub));

        let result = processor.process_bytes(&pdf);
        assert!(matches!(
            result,
            Err(CardstmtError::Extraction(ExtractionError::NoText))
        ));
    }

    #[test]
    fn test_short_text_layer_proceeds_with_warning_when_ocr_disabled() {
        let pdf = text_pdf(&["OneCard Card ending 1234"]);
        let processor = StatementProcessor::new().with_min_text_length(500);

        let outcome = processor.process_bytes(&pdf).unwrap();

        assert_eq!(outcome.source, TextSource::TextLayer);
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.contains("OCR is disabled")));
        assert_eq!(outcome.record.issuer, Issuer::OneCard);
    }

    #[test]
    fn test_process_text_skips_pdf_stage() {
        let processor = StatementProcessor::new();
        let outcome = processor.process_text(&ONECARD_LINES.join("\n"));

        assert_eq!(outcome.source, TextSource::TextLayer);
        assert_eq!(outcome.record.issuer, Issuer::OneCard);
        assert_eq!(outcome.record.confidence, 1.0);
    }

    #[test]
    fn test_needs_ocr_boundary() {
        assert!(needs_ocr("", 50));
        assert!(needs_ocr("   \n\t  ", 50));
        assert!(needs_ocr(&"x".repeat(49), 50));
        assert!(!needs_ocr(&"x".repeat(50), 50));
        assert!(!needs_ocr(&format!("  {}  ", "x".repeat(50)), 50));
    }
}
