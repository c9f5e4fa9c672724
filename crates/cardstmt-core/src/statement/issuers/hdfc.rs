//! HDFC Bank statement parser.
//!
//! HDFC statements usually print the masked card number, so the
//! masked rung leads the last-4 ladder here.

use lazy_static::lazy_static;
use regex::Regex;

use super::{first_amount, first_date, first_period};
use crate::statement::rules::card::{contextual_last4, masked_last4};
use crate::statement::rules::patterns::{AMOUNT_TOKEN, DATE_TOKEN, RANGE_SEP};
use crate::statement::rules::{PatternTier, StatementFields};

lazy_static! {
    static ref PERIOD_STATEMENT: Regex = Regex::new(&format!(
        r"(?i)statement\s+period[\s:]*({DATE_TOKEN}){RANGE_SEP}({DATE_TOKEN})"
    ))
    .unwrap();
    static ref PERIOD_ALT: Regex = Regex::new(&format!(
        r"(?i)billing\s+(?:period|cycle)[\s:]*({DATE_TOKEN}){RANGE_SEP}({DATE_TOKEN})"
    ))
    .unwrap();
    static ref DUE_PRIMARY: Regex =
        Regex::new(&format!(r"(?i)payment\s+due\s+date[\s:]*({DATE_TOKEN})")).unwrap();
    static ref DUE_FALLBACK: Regex =
        Regex::new(&format!(r"(?i)\bdue\s+date[\s:]*({DATE_TOKEN})")).unwrap();
    static ref MIN_DUE_PRIMARY: Regex = Regex::new(&format!(
        r"(?i)minimum\s+(?:amount\s+)?due[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
    static ref MIN_DUE_FALLBACK: Regex =
        Regex::new(&format!(r"(?i)min\.?\s+due[\s:]*({AMOUNT_TOKEN})")).unwrap();
    static ref BALANCE_PRIMARY: Regex = Regex::new(&format!(
        r"(?i)(?:total\s+(?:amount\s+)?due|new\s+balance)[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
    static ref BALANCE_FALLBACK: Regex =
        Regex::new(&format!(r"(?i)closing\s+balance[\s:]*({AMOUNT_TOKEN})")).unwrap();
}

/// Extract raw fields from HDFC statement text.
pub fn parse(text: &str) -> StatementFields {
    let card_last4 = masked_last4(text).or_else(|| contextual_last4(text));

    let (period_start, period_end) = first_period(
        text,
        &[
            (&*PERIOD_STATEMENT, PatternTier::Primary),
            (&*PERIOD_ALT, PatternTier::Fallback),
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
