//! Routing from detected issuer to parser, and record assembly.

use tracing::{debug, warn};

use super::detector::detect_issuer;
use super::issuers;
use super::rules::StatementFields;
use super::scoring::{aggregate_confidence, field_confidences, missing_fields};
use crate::models::{BillingPeriod, Issuer, StatementRecord, TextSource};

/// Minimum trimmed text length worth handing to a parser at all.
pub const MIN_PARSE_TEXT: usize = 10;

/// Longest plausible billing cycle, in days. A reversed period wider
/// than this is treated as a misparse rather than swapped.
pub const MAX_CYCLE_DAYS: i64 = 45;

type ParserFn = fn(&str) -> StatementFields;

/// The closed parser table. Exactly one parser per supported issuer.
fn parser_for(issuer: Issuer) -> Option<ParserFn> {
    match issuer {
        Issuer::OneCard => Some(issuers::onecard::parse),
        Issuer::BuildingBlocks => Some(issuers::buildingblocks::parse),
        Issuer::Hdfc => Some(issuers::hdfc::parse),
        Issuer::Amex => Some(issuers::amex::parse),
        Issuer::FirstCitizens => Some(issuers::firstcitizens::parse),
        Issuer::Unknown => None,
    }
}

/// Result of parsing one statement text, with extraction metadata.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// The assembled record.
    pub record: StatementRecord,
    /// Where the text came from.
    pub source: TextSource,
    /// Name of the OCR engine, when OCR produced the text.
    pub ocr_engine: Option<String>,
    /// Human-readable notes about repairs and dropped values.
    pub warnings: Vec<String>,
    /// Scored fields that came up absent.
    pub missing_fields: Vec<&'static str>,
    /// Per-field confidence contributions.
    pub field_confidence: Vec<(&'static str, f32)>,
    /// Wall-clock processing time, filled in by the processor.
    pub processing_time_ms: u64,
}

impl ParseOutcome {
    /// Whether a supported issuer claimed the document.
    pub fn is_supported(&self) -> bool {
        self.record.issuer.is_known()
    }

    fn unsupported() -> Self {
        Self {
            record: StatementRecord::unsupported(),
            source: TextSource::Unknown,
            ocr_engine: None,
            warnings: Vec::new(),
            missing_fields: super::scoring::SCORED_FIELDS.to_vec(),
            field_confidence: super::scoring::SCORED_FIELDS
                .iter()
                .map(|name| (*name, 0.0))
                .collect(),
            processing_time_ms: 0,
        }
    }
}

/// Parse statement text end to end: detect the issuer, run its
/// parser, repair the billing period, score, and assemble the record.
///
/// Unknown issuers and too-short text yield the terminal unsupported
/// outcome with every field absent and confidence 0.0.
pub fn parse_statement(text: &str) -> ParseOutcome {
    if text.trim().len() < MIN_PARSE_TEXT {
        debug!("text too short to parse ({} chars)", text.trim().len());
        return ParseOutcome::unsupported();
    }

    let issuer = detect_issuer(text);
    let Some(parser) = parser_for(issuer) else {
        return ParseOutcome::unsupported();
    };

    let mut fields = parser(text);
    let mut warnings = Vec::new();
    enforce_period_order(&mut fields, &mut warnings);

    let confidence = aggregate_confidence(&fields);
    let missing = missing_fields(&fields);
    let per_field = field_confidences(&fields);

    let record = StatementRecord {
        issuer,
        card_last4: fields.card_last4.map(|m| m.value),
        billing_period: BillingPeriod {
            start: fields.period_start.map(|m| m.value),
            end: fields.period_end.map(|m| m.value),
        },
        payment_due_date: fields.payment_due_date.map(|m| m.value),
        minimum_due: fields.minimum_due.map(|m| m.value),
        new_balance: fields.new_balance.map(|m| m.value),
        confidence,
    };

    debug!(
        "parsed {} statement, confidence {:.2}, {} missing",
        issuer,
        confidence,
        missing.len()
    );

    ParseOutcome {
        record,
        source: TextSource::Unknown,
        ocr_engine: None,
        warnings,
        missing_fields: missing,
        field_confidence: per_field,
        processing_time_ms: 0,
    }
}

/// Repair a reversed billing period.
///
/// A reversal within one plausible cycle is a swapped label pair and
/// gets flipped; anything wider is a misparse and both endpoints are
/// dropped.
fn enforce_period_order(fields: &mut StatementFields, warnings: &mut Vec<String>) {
    let (Some(start), Some(end)) = (&fields.period_start, &fields.period_end) else {
        return;
    };
    if start.value <= end.value {
        return;
    }

    let gap = (start.value - end.value).num_days();
    if gap <= MAX_CYCLE_DAYS {
        let msg = format!(
            "billing period endpoints reversed ({} > {}), swapped",
            start.value, end.value
        );
        warn!("{msg}");
        warnings.push(msg);
        std::mem::swap(&mut fields.period_start, &mut fields.period_end);
    } else {
        let msg = format!(
            "billing period reversed by {gap} days ({} > {}), dropping both endpoints",
            start.value, end.value
        );
        warn!("{msg}");
        warnings.push(msg);
        fields.period_start = None;
        fields.period_end = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::rules::FieldMatch;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const ONECARD_SAMPLE: &str = r#"OneCard Statement
Card ending 1234
Billing Period: 14 Aug 2025 - 13 Sep 2025
Payment Due Date: 03 Oct 2025
Total Due: ₹25,000.00
Minimum Due: ₹5,000.00
"#;

    #[test]
    fn test_parse_onecard_end_to_end() {
        let outcome = parse_statement(ONECARD_SAMPLE);
        let record = &outcome.record;

        assert!(outcome.is_supported());
        assert_eq!(record.issuer, Issuer::OneCard);
        assert_eq!(record.card_last4.as_deref(), Some("1234"));
        assert_eq!(
            record.billing_period.start,
            NaiveDate::from_ymd_opt(2025, 8, 14)
        );
        assert_eq!(
            record.billing_period.end,
            NaiveDate::from_ymd_opt(2025, 9, 13)
        );
        assert_eq!(
            record.payment_due_date,
            NaiveDate::from_ymd_opt(2025, 10, 3)
        );
        assert_eq!(record.new_balance, Some(25000.0));
        assert_eq!(record.minimum_due, Some(5000.0));
        assert_eq!(record.confidence, 1.0);
        assert!(outcome.missing_fields.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_unknown_issuer_yields_null_record() {
        let outcome = parse_statement("Some Unknown Bank statement with words");
        let record = &outcome.record;

        assert!(!outcome.is_supported());
        assert_eq!(record.issuer, Issuer::Unknown);
        assert_eq!(record.card_last4, None);
        assert_eq!(record.billing_period.start, None);
        assert_eq!(record.billing_period.end, None);
        assert_eq!(record.payment_due_date, None);
        assert_eq!(record.new_balance, None);
        assert_eq!(record.minimum_due, None);
        assert_eq!(record.confidence, 0.0);
        assert_eq!(outcome.missing_fields.len(), 6);
    }

    #[test]
    fn test_short_text_is_unsupported() {
        let outcome = parse_statement("   hdfc   ");
        assert!(!outcome.is_supported());
        assert_eq!(outcome.record.confidence, 0.0);
    }

    #[test]
    fn test_reversed_period_within_cycle_swaps() {
        let text = r#"HDFC Bank
Statement Period: 15/08/2025 - 16/07/2025
"#;
        let outcome = parse_statement(text);
        let record = &outcome.record;

        assert_eq!(
            record.billing_period.start,
            NaiveDate::from_ymd_opt(2025, 7, 16)
        );
        assert_eq!(
            record.billing_period.end,
            NaiveDate::from_ymd_opt(2025, 8, 15)
        );
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("swapped"));
    }

    #[test]
    fn test_reversed_period_beyond_cycle_drops_both() {
        let text = r#"HDFC Bank
Statement Period: 15/08/2025 - 16/01/2025
"#;
        let outcome = parse_statement(text);
        let record = &outcome.record;

        assert_eq!(record.billing_period.start, None);
        assert_eq!(record.billing_period.end, None);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("dropping"));
        assert!(outcome.missing_fields.contains(&"period_start"));
        assert!(outcome.missing_fields.contains(&"period_end"));
    }

    #[test]
    fn test_ordered_period_untouched() {
        let mut fields = StatementFields {
            period_start: Some(FieldMatch::primary(
                NaiveDate::from_ymd_opt(2025, 8, 14).unwrap(),
                "14 Aug 2025",
            )),
            period_end: Some(FieldMatch::primary(
                NaiveDate::from_ymd_opt(2025, 9, 13).unwrap(),
                "13 Sep 2025",
            )),
            ..StatementFields::default()
        };
        let mut warnings = Vec::new();

        enforce_period_order(&mut fields, &mut warnings);

        assert_eq!(
            fields.period_start.unwrap().value,
            NaiveDate::from_ymd_opt(2025, 8, 14).unwrap()
        );
        assert_eq!(
            fields.period_end.unwrap().value,
            NaiveDate::from_ymd_opt(2025, 9, 13).unwrap()
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_confidence_drops_after_period_drop() {
        // Reversal beyond the cycle bound zeroes both period fields,
        // which the aggregate score must reflect.
        let text = r#"HDFC Bank
Statement Period: 15/08/2025 - 16/01/2025
Payment Due Date: 04/09/2025
"#;
        let outcome = parse_statement(text);
        // Only payment_due_date scores: 1.0 / 6 -> 0.17
        assert_eq!(outcome.record.confidence, 0.17);
    }
}
