//! Confidence scoring over extracted fields.

use super::rules::{FieldMatch, StatementFields};

/// The six scored fields, in report order.
pub const SCORED_FIELDS: [&str; 6] = [
    "card_last4",
    "period_start",
    "period_end",
    "payment_due_date",
    "new_balance",
    "minimum_due",
];

fn score_of<T>(field: &Option<FieldMatch<T>>) -> f32 {
    field.as_ref().map(|m| m.confidence()).unwrap_or(0.0)
}

/// Per-field confidence contributions, in `SCORED_FIELDS` order.
pub fn field_confidences(fields: &StatementFields) -> Vec<(&'static str, f32)> {
    vec![
        ("card_last4", score_of(&fields.card_last4)),
        ("period_start", score_of(&fields.period_start)),
        ("period_end", score_of(&fields.period_end)),
        ("payment_due_date", score_of(&fields.payment_due_date)),
        ("new_balance", score_of(&fields.new_balance)),
        ("minimum_due", score_of(&fields.minimum_due)),
    ]
}

/// Names of scored fields that came up absent.
pub fn missing_fields(fields: &StatementFields) -> Vec<&'static str> {
    field_confidences(fields)
        .into_iter()
        .filter(|(_, score)| *score == 0.0)
        .map(|(name, _)| name)
        .collect()
}

/// Aggregate confidence: the mean over all six scored fields, rounded
/// to two decimals. An absent field contributes zero, so the score
/// degrades smoothly rather than cliff-dropping.
pub fn aggregate_confidence(fields: &StatementFields) -> f32 {
    let sum: f32 = field_confidences(fields).iter().map(|(_, s)| s).sum();
    let mean = sum / SCORED_FIELDS.len() as f32;
    (mean * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::rules::FieldMatch;
    use pretty_assertions::assert_eq;

    fn all_primary() -> StatementFields {
        StatementFields {
            card_last4: Some(FieldMatch::primary("1234".to_string(), "1234")),
            period_start: Some(FieldMatch::primary(
                chrono::NaiveDate::from_ymd_opt(2025, 8, 14).unwrap(),
                "14 Aug 2025",
            )),
            period_end: Some(FieldMatch::primary(
                chrono::NaiveDate::from_ymd_opt(2025, 9, 13).unwrap(),
                "13 Sep 2025",
            )),
            payment_due_date: Some(FieldMatch::primary(
                chrono::NaiveDate::from_ymd_opt(2025, 10, 3).unwrap(),
                "03 Oct 2025",
            )),
            new_balance: Some(FieldMatch::primary(25000.0, "25,000.00")),
            minimum_due: Some(FieldMatch::primary(5000.0, "5,000.00")),
        }
    }

    #[test]
    fn test_all_primary_scores_one() {
        assert_eq!(aggregate_confidence(&all_primary()), 1.0);
        assert!(missing_fields(&all_primary()).is_empty());
    }

    #[test]
    fn test_empty_fields_score_zero() {
        let fields = StatementFields::default();
        assert_eq!(aggregate_confidence(&fields), 0.0);
        assert_eq!(missing_fields(&fields), SCORED_FIELDS.to_vec());
    }

    #[test]
    fn test_fallback_field_lowers_score() {
        let mut fields = all_primary();
        fields.minimum_due = Some(FieldMatch::fallback(5000.0, "5,000.00"));
        // (5 * 1.0 + 0.6) / 6 = 0.9333... -> 0.93
        assert_eq!(aggregate_confidence(&fields), 0.93);
    }

    #[test]
    fn test_missing_field_rounding() {
        let mut fields = all_primary();
        fields.minimum_due = None;
        // 5 / 6 = 0.8333... -> 0.83
        assert_eq!(aggregate_confidence(&fields), 0.83);
        assert_eq!(missing_fields(&fields), vec!["minimum_due"]);
    }
}
