//! Opening hours label.

use crate::extract::strategy::{FieldChain, Source, Strategy};

use super::contains_any;

const HOURS_SELECTORS: [&str; 5] = [
    "[aria-label*='hours']",
    "[class*='hour']",
    "[data-item-id*='hour']",
    "div[aria-label*='Hours']",
    "div[class*='fontBodyMedium']",
];

const HOURS_KEYWORDS: [&str; 5] = ["hour", "open", "closed", "ساعات", "عمل"];

#[must_use]
pub fn mentions_hours(text: &str) -> bool {
    contains_any(text, &HOURS_KEYWORDS)
}

#[must_use]
pub fn chain() -> FieldChain<String> {
    HOURS_SELECTORS.iter().fold(FieldChain::new("hours"), |chain, &sel| {
        chain.then(Strategy::new(sel, Source::LabelOrText(sel), |text| {
            mentions_hours(text).then(|| text.to_string())
        }))
    })
}
