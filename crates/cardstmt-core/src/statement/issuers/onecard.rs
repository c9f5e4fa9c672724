//! OneCard (FPL Technologies) statement parser.

use lazy_static::lazy_static;
use regex::Regex;

use super::{first_amount, first_date, first_last4, first_period};
use crate::statement::rules::card::{contextual_last4, masked_last4};
use crate::statement::rules::patterns::{AMOUNT_TOKEN, DATE_TOKEN, RANGE_SEP};
use crate::statement::rules::{PatternTier, StatementFields};

lazy_static! {
    static ref LAST4_ENDING: Regex =
        Regex::new(r"(?i)\b(?:one)?card\s+ending\s+(?:in\s+)?(\d{4})\b").unwrap();
    static ref LAST4_NUMBER: Regex =
        Regex::new(r"(?i)\b(?:onecard|card)\s*(?:number|no\.?)[\s:]+[^\n]{0,40}?(\d{4})\b")
            .unwrap();
    static ref PERIOD_LABELED: Regex = Regex::new(&format!(
        r"(?i)(?:billing|statement)\s+period[\s:]*({DATE_TOKEN}){RANGE_SEP}({DATE_TOKEN})"
    ))
    .unwrap();
    static ref PERIOD_BARE: Regex =
        Regex::new(&format!(r"({DATE_TOKEN}){RANGE_SEP}({DATE_TOKEN})")).unwrap();
    static ref DUE_PRIMARY: Regex =
        Regex::new(&format!(r"(?i)payment\s+due\s+date[\s:]*({DATE_TOKEN})")).unwrap();
    static ref DUE_FALLBACK: Regex =
        Regex::new(&format!(r"(?i)\bdue\s+date[\s:]*({DATE_TOKEN})")).unwrap();
    static ref BALANCE_PRIMARY: Regex = Regex::new(&format!(
        r"(?i)(?:new\s+balance|total\s+(?:amount\s+)?due)[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
    static ref BALANCE_FALLBACK: Regex = Regex::new(&format!(
        r"(?i)(?:closing|outstanding)\s+balance[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
    static ref MIN_DUE_PRIMARY: Regex = Regex::new(&format!(
        r"(?i)minimum\s+(?:amount\s+)?due[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
    static ref MIN_DUE_FALLBACK: Regex = Regex::new(&format!(
        r"(?i)min\.?\s+(?:amt\.?\s+)?due[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
}

/// Extract raw fields from OneCard statement text.
pub fn parse(text: &str) -> StatementFields {
    // The labeled-number pattern tolerates a gap before the digits,
    // so it ranks below the adjacency label and the masked number.
    let card_last4 = first_last4(text, &[(&*LAST4_ENDING, PatternTier::Primary)])
        .or_else(|| masked_last4(text))
        .or_else(|| first_last4(text, &[(&*LAST4_NUMBER, PatternTier::Fallback)]))
        .or_else(|| contextual_last4(text));

    let (period_start, period_end) = first_period(
        text,
        &[
            (&*PERIOD_LABELED, PatternTier::Primary),
            (&*PERIOD_BARE, PatternTier::Fallback),
        ],
    );

    let payment_due_date = first_date(
        text,
        &[
            (&*DUE_PRIMARY, PatternTier::Primary),
            (&*DUE_FALLBACK, PatternTier::Fallback),
        ],
    );

    let new_balance = first_amount(
        text,
        &[
            (&*BALANCE_PRIMARY, PatternTier::Primary),
            (&*BALANCE_FALLBACK, PatternTier::Fallback),
        ],
    );

    let minimum_due = first_amount(
        text,
        &[
            (&*MIN_DUE_PRIMARY, PatternTier::Primary),
            (&*MIN_DUE_FALLBACK, PatternTier::Fallback),
        ],
    );

    StatementFields {
        card_last4,
        period_start,
        period_end,
        payment_due_date,
        new_balance,
        minimum_due,
    }
}
