//! Scripted OCR engine for tests and dry runs.

use std::sync::Mutex;

use image::DynamicImage;

use super::{OcrEngine, Result};

/// Engine that replays canned page texts in order.
///
/// Each `recognize` call returns the next scripted page; once the
/// script is exhausted, further calls return empty text.
pub struct StubEngine {
    pages: Vec<String>,
    cursor: Mutex<usize>,
}

impl StubEngine {
    /// Engine scripted with the given page texts.
    pub fn new<S: Into<String>>(pages: Vec<S>) -> Self {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
            cursor: Mutex::new(0),
        }
    }

    /// Number of pages recognized so far.
    pub fn calls(&self) -> usize {
        *self.cursor.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl OcrEngine for StubEngine {
    fn recognize(&self, _image: &DynamicImage) -> Result<String> {
        let mut cursor = self.cursor.lock().unwrap_or_else(|e| e.into_inner());
        let page = self.pages.get(*cursor).cloned().unwrap_or_default();
        *cursor += 1;
        Ok(page)
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_pages_in_order() {
        let engine = StubEngine::new(vec!["page one", "page two"]);
        let image = DynamicImage::new_luma8(1, 1);

        assert_eq!(engine.recognize(&image).unwrap(), "page one");
        assert_eq!(engine.recognize(&image).unwrap(), "page two");
        assert_eq!(engine.recognize(&image).unwrap(), "");
        assert_eq!(engine.calls(), 3);
    }
}
