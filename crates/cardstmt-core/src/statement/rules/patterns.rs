//! Shared regex building blocks for statement field extraction.
//!
//! Issuer parsers compose their labeled patterns from the token
//! fragments below, so every parser accepts the same date and amount
//! spellings and only the label vocabulary differs.

use lazy_static::lazy_static;
use regex::Regex;

/// One date token in any accepted spelling.
///
/// Ordered so ISO dates are claimed before the numeric day-first form
/// can nibble at them. Matches e.g. `2025-10-03`, `14 Aug 2025`,
/// `3rd October 2025`, `Aug 14, 2025`, `03/10/2025`, `03.10.25`.
pub const DATE_TOKEN: &str = r"(?:\d{4}[./\-]\d{1,2}[./\-]\d{1,2}|\d{1,2}(?:st|nd|rd|th)?\s+[A-Za-z]{3,9}\.?,?\s+\d{4}|[A-Za-z]{3,9}\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}|\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4})";

/// One monetary amount token, currency marker optional.
///
/// Accepts Indian digit grouping (`1,23,456.00`) as well as western
/// grouping; normalization strips the decoration.
pub const AMOUNT_TOKEN: &str = r"(?:(?:₹|Rs\.?|INR|USD|[$€£])\s*)?\d[\d,]*(?:\.\d{1,2})?";

/// Range separator between the two dates of a billing period.
pub const RANGE_SEP: &str = r"\s*(?:to|through|till|[-–])\s*";

lazy_static! {
    // Anchored date forms used by normalization on captured tokens.
    pub static ref DATE_ISO: Regex =
        Regex::new(r"^(\d{4})[./\-](\d{1,2})[./\-](\d{1,2})$").unwrap();

    pub static ref DATE_DMY: Regex =
        Regex::new(r"^(\d{1,2})[./\-](\d{1,2})[./\-](\d{4}|\d{2})$").unwrap();

    pub static ref DATE_TEXTUAL_DMY: Regex =
        Regex::new(r"^(\d{1,2})(?:st|nd|rd|th)?\s+([A-Za-z]{3,9})\.?,?\s+(\d{4})$").unwrap();

    pub static ref DATE_TEXTUAL_MDY: Regex =
        Regex::new(r"^([A-Za-z]{3,9})\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})$").unwrap();

    // Card number with a visible last-4 group. The three leading
    // groups may be mask characters or digits, so both masked numbers
    // and full PANs are caught; a lone mask group is not enough.
    pub static ref MASKED_CARD: Regex =
        Regex::new(r"(?i)(?:(?:x{4}|[*•#]{4}|\d{4})[\s\-*]*){3}(\d{4})\b").unwrap();

    // A 4-digit group within bounded distance of a card-ish label, on
    // the same line.
    pub static ref LABELED_LAST4: Regex =
        Regex::new(r"(?i)\b(?:card|account|acct|number|ending|xxxx|a/c)\b[^\n]{0,50}?(\d{4})\b")
            .unwrap();

    // Line-scan keywords for the weakest last-4 rung.
    pub static ref CARD_LINE_KEYWORD: Regex = Regex::new(r"(?i)account|card|number").unwrap();

    // No leading boundary: in a longer digit run this intentionally
    // settles on the trailing four digits.
    pub static ref STANDALONE_LAST4: Regex = Regex::new(r"(\d{4})\b").unwrap();
}
