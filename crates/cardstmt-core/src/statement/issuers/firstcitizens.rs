//! First Citizens statement parser.

use lazy_static::lazy_static;
use regex::Regex;

use super::{first_amount, first_date, first_last4, first_period};
use crate::statement::rules::card::{contextual_last4, masked_last4};
use crate::statement::rules::patterns::{AMOUNT_TOKEN, DATE_TOKEN, RANGE_SEP};
use crate::statement::rules::{PatternTier, StatementFields};

lazy_static! {
    static ref LAST4_ACCOUNT: Regex =
        Regex::new(r"(?i)account\s+number[\s:]+[^\n]{0,40}?(\d{4})\b").unwrap();
    static ref PERIOD_LABELED: Regex = Regex::new(&format!(
        r"(?i)(?:billing\s+cycle|statement\s+period)[\s:]*({DATE_TOKEN}){RANGE_SEP}({DATE_TOKEN})"
    ))
    .unwrap();
    static ref DUE_PRIMARY: Regex =
        Regex::new(&format!(r"(?i)payment\s+due\s+date[\s:]*({DATE_TOKEN})")).unwrap();
    static ref DUE_FALLBACK: Regex =
        Regex::new(&format!(r"(?i)\bdue\s+date[\s:]*({DATE_TOKEN})")).unwrap();
    static ref MIN_PRIMARY: Regex = Regex::new(&format!(
        r"(?i)minimum\s+(?:payment(?:\s+due)?|due)[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
    static ref MIN_FALLBACK: Regex = Regex::new(&format!(
        r"(?i)minimum\s+amount\s+due[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
    static ref BALANCE_PRIMARY: Regex = Regex::new(&format!(
        r"(?i)(?:new\s+balance|total\s+amount\s+due)[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
    // Line-anchored so the amount-due fragment inside minimum or total
    // labels cannot claim the balance.
    static ref BALANCE_FALLBACK: Regex = Regex::new(&format!(
        r"(?im)^[^\S\n]*amount\s+due[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
}

/// Extract raw fields from First Citizens statement text.
pub fn parse(text: &str) -> StatementFields {
    // The account-number label allows a gap before the digits, so the
    // masked rung outranks it.
    let card_last4 = masked_last4(text)
        .or_else(|| first_last4(text, &[(&*LAST4_ACCOUNT, PatternTier::Fallback)]))
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
            (&*MIN_PRIMARY, PatternTier::Primary),
            (&*MIN_FALLBACK, PatternTier::Fallback),
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
