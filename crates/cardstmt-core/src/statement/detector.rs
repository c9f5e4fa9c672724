//! Issuer detection from statement text.

use tracing::debug;

use crate::models::Issuer;

/// Detection order. Earlier issuers win when a statement mentions
/// several brands (co-brand partnerships, network footers).
pub const DETECTION_ORDER: [Issuer; 5] = [
    Issuer::OneCard,
    Issuer::BuildingBlocks,
    Issuer::Hdfc,
    Issuer::Amex,
    Issuer::FirstCitizens,
];

fn keywords(issuer: Issuer) -> &'static [&'static str] {
    match issuer {
        Issuer::OneCard => &["onecard", "fpl technologies"],
        Issuer::BuildingBlocks => &["buildingblocks", "building blocks"],
        Issuer::Hdfc => &["hdfc"],
        Issuer::Amex => &["american express", "amex"],
        Issuer::FirstCitizens => &["first citizens", "firstcitizens"],
        Issuer::Unknown => &[],
    }
}

/// Detect the issuer from statement text.
///
/// Case-insensitive substring search in a fixed priority order; the
/// first issuer with any keyword present wins. Text mentioning no
/// known issuer maps to `Unknown`.
pub fn detect_issuer(text: &str) -> Issuer {
    let haystack = text.to_lowercase();
    for issuer in DETECTION_ORDER {
        if keywords(issuer).iter().any(|kw| haystack.contains(kw)) {
            debug!("detected issuer {}", issuer);
            return issuer;
        }
    }
    debug!("no issuer keyword found");
    Issuer::Unknown
}
