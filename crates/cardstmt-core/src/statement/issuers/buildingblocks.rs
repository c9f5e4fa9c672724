//! BuildingBlocks statement parser.

use lazy_static::lazy_static;
use regex::Regex;

use super::{first_amount, first_date, first_last4, first_period};
use crate::statement::rules::card::{contextual_last4, masked_last4};
use crate::statement::rules::patterns::{AMOUNT_TOKEN, DATE_TOKEN, RANGE_SEP};
use crate::statement::rules::{PatternTier, StatementFields};

lazy_static! {
    static ref LAST4_ACCOUNT: Regex =
        Regex::new(r"(?i)account\s+number[\s:]+[^\n]{0,40}?(\d{4})\b").unwrap();
    static ref PERIOD_DATES: Regex = Regex::new(&format!(
        r"(?i)opening[/\s]+closing\s+date[\s:]*({DATE_TOKEN}){RANGE_SEP}({DATE_TOKEN})"
    ))
    .unwrap();
    static ref PERIOD_ALT: Regex = Regex::new(&format!(
        r"(?i)(?:billing|statement)\s+period[\s:]*({DATE_TOKEN}){RANGE_SEP}({DATE_TOKEN})"
    ))
    .unwrap();
    static ref DUE_PRIMARY: Regex =
        Regex::new(&format!(r"(?i)payment\s+due\s+date[\s:]*({DATE_TOKEN})")).unwrap();
    static ref DUE_FALLBACK: Regex =
        Regex::new(&format!(r"(?i)\bdue\s+date[\s:]*({DATE_TOKEN})")).unwrap();
    static ref MIN_PAYMENT: Regex = Regex::new(&format!(
        r"(?i)minimum\s+payment(?:\s+due)?[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
    static ref MIN_DUE_ALT: Regex = Regex::new(&format!(
        r"(?i)minimum\s+(?:amount\s+)?due[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
    static ref BALANCE_NEW: Regex =
        Regex::new(&format!(r"(?i)new\s+balance[\s:]*({AMOUNT_TOKEN})")).unwrap();
    static ref BALANCE_TOTAL: Regex = Regex::new(&format!(
        r"(?i)total\s+(?:amount\s+)?due[\s:]*({AMOUNT_TOKEN})"
    ))
    .unwrap();
}

/// Extract raw fields from BuildingBlocks statement text.
pub fn parse(text: &str) -> StatementFields {
    // The account-number label allows a gap before the digits, so the
    // masked rung outranks it.
    let card_last4 = masked_last4(text)
        .or_else(|| first_last4(text, &[(&*LAST4_ACCOUNT, PatternTier::Fallback)]))
        .or_else(|| contextual_last4(text));

    let (period_start, period_end) = first_period(
        text,
        &[
            (&*PERIOD_DATES, PatternTier::Primary),
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
            (&*BALANCE_NEW, PatternTier::Primary),
            (&*BALANCE_TOTAL, PatternTier::Fallback),
        ],
    );

    let minimum_due = first_amount(
        text,
        &[
            (&*MIN_PAYMENT, PatternTier::Primary),
            (&*MIN_DUE_ALT, PatternTier::Fallback),
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"BuildingBlocks Credit Card
Account Number: XXXX-XXXX-XXXX-7788
Opening/Closing Date: 05/08/2025 - 04/09/2025
Payment Due Date: 22/09/2025
New Balance: $2,340.50
Minimum Payment: $35.00
"#;

    #[test]
    fn test_parse_full_statement() {
        let fields = parse(SAMPLE);

        let last4 = fields.card_last4.unwrap();
        assert_eq!(last4.value, "7788");
        assert_eq!(last4.tier, PatternTier::Primary);

        let start = fields.period_start.unwrap();
        assert_eq!(start.value, NaiveDate::from_ymd_opt(2025, 8, 5).unwrap());
        assert_eq!(start.tier, PatternTier::Primary);

        let end = fields.period_end.unwrap();
        assert_eq!(end.value, NaiveDate::from_ymd_opt(2025, 9, 4).unwrap());

        assert_eq!(
            fields.payment_due_date.unwrap().value,
            NaiveDate::from_ymd_opt(2025, 9, 22).unwrap()
        );
        assert_eq!(fields.new_balance.unwrap().value, 2340.50);
        assert_eq!(fields.minimum_due.unwrap().value, 35.0);
    }

    #[test]
    fn test_total_due_balance_is_fallback() {
        let fields = parse("Total Amount Due: $120.00");
        let balance = fields.new_balance.unwrap();
        assert_eq!(balance.value, 120.0);
        assert_eq!(balance.tier, PatternTier::Fallback);
    }

    #[test]
    fn test_minimum_due_spelling_is_fallback() {
        let fields = parse("Minimum Due: $25.00");
        let min_due = fields.minimum_due.unwrap();
        assert_eq!(min_due.value, 25.0);
        assert_eq!(min_due.tier, PatternTier::Fallback);
    }

    #[test]
    fn test_billing_period_label_is_fallback() {
        let fields = parse("Billing Period: 01/08/2025 - 31/08/2025");
        assert_eq!(fields.period_start.unwrap().tier, PatternTier::Fallback);
        assert_eq!(fields.period_end.unwrap().tier, PatternTier::Fallback);
    }

    #[test]
    fn test_minimum_payment_due_spelling() {
        let fields = parse("Minimum Payment Due: $12.00");
        let min_due = fields.minimum_due.unwrap();
        assert_eq!(min_due.value, 12.0);
        assert_eq!(min_due.tier, PatternTier::Primary);
    }

    #[test]
    fn test_bare_due_date_is_fallback() {
        let fields = parse("Due Date: 22/09/2025");
        let due = fields.payment_due_date.unwrap();
        assert_eq!(due.value, NaiveDate::from_ymd_opt(2025, 9, 22).unwrap());
        assert_eq!(due.tier, PatternTier::Fallback);
    }

    #[test]
    fn test_unmasked_account_number_is_fallback() {
        let fields = parse("Account Number: ending in 9023");
        let last4 = fields.card_last4.unwrap();
        assert_eq!(last4.value, "9023");
        assert_eq!(last4.tier, PatternTier::Fallback);
    }
}
