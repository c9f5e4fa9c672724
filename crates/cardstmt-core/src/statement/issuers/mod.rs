//! Per-issuer statement parsers.
//!
//! Each parser is a pure function from statement text to raw field
//! matches. They share the same date and amount token grammar; only
//! the label vocabulary and the tier each label sits in differ.

pub mod amex;
pub mod buildingblocks;
pub mod firstcitizens;
pub mod hdfc;
pub mod onecard;

use chrono::NaiveDate;
use regex::Regex;

use super::rules::{
    normalize_currency, normalize_date, FieldMatch, PatternTier,
};
use super::rules::card::year_like;

/// First date claimed by a tiered pattern list.
///
/// Within one tier, later occurrences are tried when an earlier
/// capture fails to normalize, so a decorative "TBD" next to a label
/// does not shadow the real date further down.
fn first_date(text: &str, tiers: &[(&Regex, PatternTier)]) -> Option<FieldMatch<NaiveDate>> {
    for (regex, tier) in tiers {
        for caps in regex.captures_iter(text) {
            let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if let Some(date) = normalize_date(token.as_str()) {
                return Some(FieldMatch {
                    value: date,
                    tier: *tier,
                    position: Some((whole.start(), whole.end())),
                    source: whole.as_str().to_string(),
                });
            }
        }
    }
    None
}

/// First amount claimed by a tiered pattern list.
fn first_amount(text: &str, tiers: &[(&Regex, PatternTier)]) -> Option<FieldMatch<f64>> {
    for (regex, tier) in tiers {
        for caps in regex.captures_iter(text) {
            let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if let Some(amount) = normalize_currency(token.as_str()) {
                return Some(FieldMatch {
                    value: amount,
                    tier: *tier,
                    position: Some((whole.start(), whole.end())),
                    source: whole.as_str().to_string(),
                });
            }
        }
    }
    None
}

/// Billing period from the first matching range pattern.
///
/// The first pattern that matches claims the period; its two sides
/// normalize independently, so one malformed endpoint does not drop
/// the other.
#[allow(clippy::type_complexity)]
fn first_period(
    text: &str,
    tiers: &[(&Regex, PatternTier)],
) -> (Option<FieldMatch<NaiveDate>>, Option<FieldMatch<NaiveDate>>) {
    for (regex, tier) in tiers {
        let Some(caps) = regex.captures(text) else {
            continue;
        };
        let start = caps
            .get(1)
            .and_then(|m| normalize_date(m.as_str()).map(|d| (d, m)));
        let end = caps
            .get(2)
            .and_then(|m| normalize_date(m.as_str()).map(|d| (d, m)));

        let to_match = |side: Option<(NaiveDate, regex::Match<'_>)>| {
            side.map(|(date, m)| FieldMatch {
                value: date,
                tier: *tier,
                position: Some((m.start(), m.end())),
                source: m.as_str().to_string(),
            })
        };
        return (to_match(start), to_match(end));
    }
    (None, None)
}

/// First labeled last-4 capture that is not year-like.
fn first_last4(text: &str, tiers: &[(&Regex, PatternTier)]) -> Option<FieldMatch<String>> {
    for (regex, tier) in tiers {
        for caps in regex.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            if year_like(m.as_str()) {
                continue;
            }
            return Some(FieldMatch {
                value: m.as_str().to_string(),
                tier: *tier,
                position: Some((m.start(), m.end())),
                source: m.as_str().to_string(),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref DUE: Regex = Regex::new(r"(?i)due[\s:]*(\d{1,2}/\d{1,2}/\d{4})").unwrap();
    }

    #[test]
    fn test_first_date_skips_unparsable_occurrences() {
        let text = "Due: 99/99/9999 and later Due: 03/10/2025";
        let m = first_date(text, &[(&DUE, PatternTier::Primary)]).unwrap();
        assert_eq!(
            m.value,
            NaiveDate::from_ymd_opt(2025, 10, 3).unwrap()
        );
    }

    #[test]
    fn test_first_period_claims_on_first_matching_pattern() {
        lazy_static! {
            static ref RANGE: Regex =
                Regex::new(r"(\d{1,2}/\d{1,2}/\d{4})\s*-\s*(\d{1,2}/\d{1,2}/\d{4})").unwrap();
        }
        let (start, end) = first_period(
            "Cycle 99/99/2025 - 13/09/2025",
            &[(&RANGE, PatternTier::Fallback)],
        );
        assert!(start.is_none());
        assert_eq!(
            end.unwrap().value,
            NaiveDate::from_ymd_opt(2025, 9, 13).unwrap()
        );
    }
}
