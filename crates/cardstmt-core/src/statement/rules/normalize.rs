//! Normalization of captured currency and date tokens.

use chrono::NaiveDate;

use super::patterns::{DATE_DMY, DATE_ISO, DATE_TEXTUAL_DMY, DATE_TEXTUAL_MDY};

/// Normalize a captured currency token to a plain amount.
///
/// Strips currency markers, digit grouping and whitespace. Empty,
/// unparsable and negative inputs all normalize to absent; an absent
/// amount is never reported as zero.
pub fn normalize_currency(raw: &str) -> Option<f64> {
    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '₹' | '$' | '€' | '£' | ',' => {}
            c if c.is_whitespace() => {}
            _ => cleaned.push(c),
        }
    }

    // Currency codes (Rs., INR) and credit markers (Cr) survive the
    // character pass as letters hugging the digits.
    let cleaned = cleaned.trim_matches(|c: char| c.is_ascii_alphabetic() || c == '.');
    if cleaned.is_empty() {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    if value < 0.0 {
        return None;
    }
    Some(value)
}

/// Normalize a captured date token, interpreting numeric forms
/// day-first.
///
/// An ambiguous or impossible token normalizes to absent rather than
/// being reinterpreted month-first.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.trim().trim_end_matches(['.', ',']);

    if let Some(caps) = DATE_ISO.captures(cleaned) {
        let year = parse_year(&caps[1]);
        let month: u32 = caps[2].parse().unwrap_or(0);
        let day: u32 = caps[3].parse().unwrap_or(0);
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_DMY.captures(cleaned) {
        let day: u32 = caps[1].parse().unwrap_or(0);
        let month: u32 = caps[2].parse().unwrap_or(0);
        let year = parse_year(&caps[3]);
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_TEXTUAL_DMY.captures(cleaned) {
        let day: u32 = caps[1].parse().unwrap_or(0);
        let month = month_to_number(&caps[2])?;
        let year: i32 = caps[3].parse().unwrap_or(0);
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_TEXTUAL_MDY.captures(cleaned) {
        let month = month_to_number(&caps[1])?;
        let day: u32 = caps[2].parse().unwrap_or(0);
        let year: i32 = caps[3].parse().unwrap_or(0);
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 {
        // Two-digit year: 00-50 maps to 2000s, 51-99 to 1900s
        if year <= 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}

fn month_to_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let prefix = lower.get(..3)?;
    Some(match prefix {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    })
}
