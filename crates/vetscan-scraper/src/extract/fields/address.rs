//! Street address.

use crate::extract::strategy::{FieldChain, Source, Strategy};

use super::{ascii_digit, contains_any};

const ADDRESS_SELECTORS: [&str; 6] = [
    "div.fontBodyMedium > span",
    "[class*='address']",
    "[data-item-id*='address']",
    "div[aria-label*='Address']",
    "button[data-item-id*='address']",
    "div[class*='fontBodyMedium']",
];

const LINE_EXCLUSIONS: [&str; 4] = ["review", "rating", "website", "http"];

/// Check applied to text found under an address-like selector.
#[must_use]
pub fn is_address_candidate(text: &str) -> bool {
    text.chars().count() > 5 && !text.starts_with("http") && !contains_any(text, &["review"])
}

/// Check applied to free text lines when no address element matched.
#[must_use]
pub fn is_address_line(line: &str) -> bool {
    line.chars().count() > 10
        && line.chars().any(|c| ascii_digit(c).is_some())
        && !contains_any(line, &LINE_EXCLUSIONS)
}

#[must_use]
pub fn chain() -> FieldChain<String> {
    ADDRESS_SELECTORS
        .iter()
        .fold(FieldChain::new("address"), |chain, &sel| {
            chain.then(Strategy::new(sel, Source::Text(sel), |text| {
                is_address_candidate(text).then(|| text.to_string())
            }))
        })
        .then(Strategy::new("text-line-digits", Source::NodeLines, |line| {
            is_address_line(line).then(|| line.to_string())
        }))
}
