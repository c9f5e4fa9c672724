//! Statement field extraction module.

pub mod detector;
mod dispatcher;
pub mod issuers;
mod processor;
pub mod rules;
pub mod scoring;

pub use detector::{detect_issuer, DETECTION_ORDER};
pub use dispatcher::{parse_statement, ParseOutcome, MAX_CYCLE_DAYS, MIN_PARSE_TEXT};
pub use processor::{needs_ocr, StatementProcessor};
pub use scoring::{aggregate_confidence, field_confidences, missing_fields, SCORED_FIELDS};
