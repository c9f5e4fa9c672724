//! Statement data models shared by the extraction pipeline and the CLI.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Supported statement issuers, plus the terminal `Unknown` tag.
///
/// The serialized names are the stable wire tags used in JSON and CSV
/// output; `unknown` marks a document no parser claims.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Issuer {
    #[serde(rename = "OneCard")]
    OneCard,
    #[serde(rename = "BuildingBlocks")]
    BuildingBlocks,
    #[serde(rename = "HDFC")]
    Hdfc,
    #[serde(rename = "AMEX")]
    Amex,
    #[serde(rename = "FirstCitizens")]
    FirstCitizens,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Issuer {
    /// Stable display tag, identical to the serialized form.
    pub fn tag(&self) -> &'static str {
        match self {
            Issuer::OneCard => "OneCard",
            Issuer::BuildingBlocks => "BuildingBlocks",
            Issuer::Hdfc => "HDFC",
            Issuer::Amex => "AMEX",
            Issuer::FirstCitizens => "FirstCitizens",
            Issuer::Unknown => "unknown",
        }
    }

    /// Whether this tag names one of the five supported issuers.
    pub fn is_known(&self) -> bool {
        !matches!(self, Issuer::Unknown)
    }
}

impl std::fmt::Display for Issuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Billing period endpoints. Either side may be absent independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// The canonical extraction result for one statement PDF.
///
/// Field order matches the output contract; absent optional fields
/// serialize as explicit `null`, never as a sentinel value, so that a
/// genuine zero balance stays distinguishable from "not found".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRecord {
    /// Detected issuer tag.
    pub issuer: Issuer,

    /// Last four digits of the card number.
    pub card_last4: Option<String>,

    /// Statement billing period.
    pub billing_period: BillingPeriod,

    /// Payment due date.
    pub payment_due_date: Option<NaiveDate>,

    /// Minimum amount due.
    pub minimum_due: Option<f64>,

    /// New balance / total amount due.
    pub new_balance: Option<f64>,

    /// Aggregate extraction confidence in [0.0, 1.0].
    pub confidence: f32,
}

impl StatementRecord {
    /// Empty record for a given issuer, all fields absent.
    pub fn empty(issuer: Issuer) -> Self {
        Self {
            issuer,
            card_last4: None,
            billing_period: BillingPeriod::default(),
            payment_due_date: None,
            minimum_due: None,
            new_balance: None,
            confidence: 0.0,
        }
    }

    /// Terminal record for a document no parser claims.
    pub fn unsupported() -> Self {
        Self::empty(Issuer::Unknown)
    }

    /// Validate the record invariants and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if let Some(last4) = &self.card_last4 {
            if last4.len() != 4 || !last4.chars().all(|c| c.is_ascii_digit()) {
                issues.push(format!("card_last4 is not four digits: {last4:?}"));
            }
        }

        if let (Some(start), Some(end)) = (self.billing_period.start, self.billing_period.end) {
            if start > end {
                issues.push(format!("billing period is reversed: {start} > {end}"));
            }
        }

        for (name, value) in [
            ("new_balance", self.new_balance),
            ("minimum_due", self.minimum_due),
        ] {
            if let Some(v) = value {
                if v < 0.0 {
                    issues.push(format!("{name} is negative: {v}"));
                }
            }
        }

        if !(0.0..=1.0).contains(&self.confidence) {
            issues.push(format!("confidence out of range: {}", self.confidence));
        }

        issues
    }
}

/// Where the parsed text came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    /// Embedded text layer extracted directly from the PDF.
    TextLayer,
    /// Text recovered by running OCR over page images.
    Ocr,
    /// Source not determined (e.g. text handed in directly).
    #[default]
    Unknown,
}
