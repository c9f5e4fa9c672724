//! American Express statement parser.

use lazy_static::lazy_static;
use regex::Regex;

use super::{first_amount, first_date, first_last4, first_period};
use crate::statement::rules::card::{contextual_last4, masked_last4};
use crate::statement::rules::patterns::{AMOUNT_TOKEN, DATE_TOKEN, RANGE_SEP};
use crate::statement::rules::{PatternTier, StatementFields};

lazy_static! {
    static ref LAST4_ENDING: Regex =
        Regex::new(r"(?i)card\s+ending\s+(?:in\s+)?(\d{4})\b").unwrap();
    static ref LAST4_NO: Regex = Regex::new(r"(?i)card\s+no\.?\s*(\d{4})\b").unwrap();
    static ref PERIOD_LABELED: Regex = Regex::new(&format!(
        r"(?i)(?:statement\s+period|billing\s+cycle)[\s:]*({DATE_TOKEN}){RANGE_SEP}({DATE_TOKEN})"
    ))
    .unwrap();
    static ref DUE_PRIMARY: Regex =
        Regex::new(&format!(r"(?i)payment\s+due\s+date[\s:]*({DATE_TOKEN})")).unwrap();
    static ref DUE_FALLBACK: Regex = Regex::new(&format!(
        r"(?i)(?:\bdue\s+date|please\s+pay\s+by)[\s:]*({DATE_TOKEN})"
    ))
    .unwrap();
    static ref MIN_DUE_PRIMARY: Regex = Regex::new(&format!(
        r"(?i)minimum\s+(?:amount\s+)?due[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
    static ref MIN_DUE_FALLBACK: Regex = Regex::new(&format!(
        r"(?i)minimum\s+payment(?:\s+due)?[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
    static ref BALANCE_PRIMARY: Regex = Regex::new(&format!(
        r"(?i)(?:new\s+balance|total\s+due)[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
    static ref BALANCE_FALLBACK: Regex = Regex::new(&format!(
        r"(?i)total\s+amount\s+due[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
}

/// Extract raw fields from American Express statement text.
pub fn parse(text: &str) -> StatementFields {
    let card_last4 = first_last4(
        text,
        &[
            (&*LAST4_ENDING, PatternTier::Primary),
            (&*LAST4_NO, PatternTier::Primary),
        ],
    )
    .or_else(|| masked_last4(text))
    .or_else(|| contextual_last4(text));

    let (period_start, period_end) =
        first_period(text, &[(&*PERIOD_LABELED, PatternTier::Primary)]);

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
