//! Rule-based field extraction shared by the issuer parsers.

pub mod card;
pub mod normalize;
pub mod patterns;

pub use card::{contextual_last4, masked_last4};
pub use normalize::{normalize_currency, normalize_date};

use chrono::NaiveDate;

/// Which tier of pattern produced a field value.
///
/// Primary patterns carry the issuer's own label vocabulary; fallback
/// patterns are looser and correspondingly less trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternTier {
    Primary,
    Fallback,
}

impl PatternTier {
    /// Per-field confidence contribution for this tier.
    pub fn confidence(&self) -> f32 {
        match self {
            PatternTier::Primary => 1.0,
            PatternTier::Fallback => 0.6,
        }
    }
}

/// A field value together with how it was matched.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch<T> {
    /// Extracted, normalized value.
    pub value: T,
    /// Pattern tier that produced the value.
    pub tier: PatternTier,
    /// Byte range of the match in the source text.
    pub position: Option<(usize, usize)>,
    /// Raw text that was matched.
    pub source: String,
}

impl<T> FieldMatch<T> {
    pub fn primary(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            tier: PatternTier::Primary,
            position: None,
            source: source.into(),
        }
    }

    pub fn fallback(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            tier: PatternTier::Fallback,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Confidence contribution of this match.
    pub fn confidence(&self) -> f32 {
        self.tier.confidence()
    }
}

/// Raw per-field matches produced by an issuer parser.
///
/// Every field is independently optional; scoring and record assembly
/// happen downstream so parsers stay pure text-to-matches functions.
#[derive(Debug, Clone, Default)]
pub struct StatementFields {
    pub card_last4: Option<FieldMatch<String>>,
    pub period_start: Option<FieldMatch<NaiveDate>>,
    pub period_end: Option<FieldMatch<NaiveDate>>,
    pub payment_due_date: Option<FieldMatch<NaiveDate>>,
    pub new_balance: Option<FieldMatch<f64>>,
    pub minimum_due: Option<FieldMatch<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_confidence() {
        assert_eq!(PatternTier::Primary.confidence(), 1.0);
        assert_eq!(PatternTier::Fallback.confidence(), 0.6);
    }

    #[test]
    fn test_field_match_builders() {
        let m = FieldMatch::primary("1234".to_string(), "Card ending 1234").with_position(10, 26);
        assert_eq!(m.tier, PatternTier::Primary);
        assert_eq!(m.position, Some((10, 26)));
        assert_eq!(m.confidence(), 1.0);

        let f = FieldMatch::fallback(42.0, "42.00");
        assert_eq!(f.confidence(), 0.6);
        assert_eq!(f.position, None);
    }
}
