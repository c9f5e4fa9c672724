//! Card last-4 extraction rungs shared by the issuer parsers.
//!
//! Three rungs, strongest first: a masked or full card number, a
//! 4-digit group near a card-ish label, and a line scan. Year-like
//! groups (1900-2099) are rejected on every rung so statement dates
//! cannot masquerade as card digits.

use super::patterns::{CARD_LINE_KEYWORD, LABELED_LAST4, MASKED_CARD, STANDALONE_LAST4};
use super::FieldMatch;

/// Last 4 digits taken from a masked or full card number.
///
/// A structured card number is strong evidence, so this rung counts
/// as primary even though the pattern is issuer-independent.
pub fn masked_last4(text: &str) -> Option<FieldMatch<String>> {
    let caps = MASKED_CARD.captures(text)?;
    let digits = caps.get(1)?;
    if year_like(digits.as_str()) {
        return None;
    }
    let whole = caps.get(0)?;
    Some(
        FieldMatch::primary(digits.as_str().to_string(), whole.as_str())
            .with_position(whole.start(), whole.end()),
    )
}

/// Last 4 digits recovered from label proximity or a line scan.
pub fn contextual_last4(text: &str) -> Option<FieldMatch<String>> {
    // Labels can repeat (summary plus detail section); the last
    // occurrence is usually the actual number.
    let labeled: Vec<_> = LABELED_LAST4.captures_iter(text).collect();
    for caps in labeled.iter().rev() {
        let Some(m) = caps.get(1) else { continue };
        if year_like(m.as_str()) {
            continue;
        }
        return Some(
            FieldMatch::fallback(m.as_str().to_string(), m.as_str())
                .with_position(m.start(), m.end()),
        );
    }

    // Weakest rung: any 4-digit group on a line mentioning the card
    // or account.
    for line in text.lines() {
        if !CARD_LINE_KEYWORD.is_match(line) {
            continue;
        }
        for caps in STANDALONE_LAST4.captures_iter(line) {
            let Some(m) = caps.get(1) else { continue };
            if year_like(m.as_str()) {
                continue;
            }
            return Some(FieldMatch::fallback(m.as_str().to_string(), m.as_str()));
        }
    }

    None
}

/// Whether a 4-digit group reads as a plausible year.
pub(crate) fn year_like(digits: &str) -> bool {
    matches!(digits.parse::<u32>(), Ok(year) if (1900..=2099).contains(&year))
}
