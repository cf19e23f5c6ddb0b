//! Listing name.

use crate::extract::strategy::{FieldChain, Source, Strategy};

use super::contains_any;

const NAME_SELECTORS: [&str; 9] = [
    "div[role='heading'] span",
    "div[role='heading']",
    "h3",
    "div.fontHeadlineLarge",
    "div.fontHeadlineMedium",
    "div[class*='fontHeadline']",
    "div[aria-level='3']",
    "button[data-tooltip] div",
    "div[class*='title']",
];

/// Words that mark a text line as naming a veterinary business.
pub const DOMAIN_KEYWORDS: [&str; 7] = [
    "vet", "clinic", "animal", "pet", "hospital", "عيادة", "بيطرية",
];

/// Whether `candidate` can be a listing name on a platform branded `brand`.
#[must_use]
pub fn is_plausible_name(candidate: &str, brand: &str) -> bool {
    candidate.chars().count() > 2
        && !candidate.chars().all(char::is_numeric)
        && !candidate.starts_with("http")
        && (brand.is_empty() || !candidate.to_lowercase().contains(brand))
}

/// Stricter check for free text lines, which must also look like a clinic.
#[must_use]
pub fn is_name_line(line: &str, brand: &str) -> bool {
    line.chars().count() > 3
        && is_plausible_name(line, brand)
        && contains_any(line, &DOMAIN_KEYWORDS)
}

#[must_use]
pub fn chain(brand: &str) -> FieldChain<String> {
    let brand = brand.to_lowercase();
    let chain = NAME_SELECTORS.iter().fold(FieldChain::new("name"), |chain, &sel| {
        let brand = brand.clone();
        chain.then(Strategy::new(sel, Source::Text(sel), move |text| {
            is_plausible_name(text, &brand).then(|| text.to_string())
        }))
    });
    chain.then(Strategy::new("text-line-keyword", Source::NodeLines, move |line| {
        is_name_line(line, &brand).then(|| line.to_string())
    }))
}
