//! Review count, kept as the platform renders it.

use crate::extract::strategy::{FieldChain, Source, Strategy};

use super::contains_any;

const REVIEW_SELECTORS: [&str; 5] = [
    "span[class*='reviews']",
    "span[aria-label*='reviews']",
    "div[class*='review']",
    "button[aria-label*='reviews']",
    "span[class*='fontBodyMedium']",
];

const REVIEW_KEYWORDS: [&str; 3] = ["review", "تقييم", "مراجعة"];

#[must_use]
pub fn mentions_reviews(text: &str) -> bool {
    contains_any(text, &REVIEW_KEYWORDS)
}

#[must_use]
pub fn chain() -> FieldChain<String> {
    REVIEW_SELECTORS
        .iter()
        .fold(FieldChain::new("review_count_text"), |chain, &sel| {
            chain.then(Strategy::new(sel, Source::Text(sel), |text| {
                mentions_reviews(text).then(|| text.to_string())
            }))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_english_and_arabic_review_wording() {
        assert!(mentions_reviews("(1,024) Reviews"));
        assert!(mentions_reviews("١٢ تقييم"));
        assert!(mentions_reviews("35 مراجعة"));
        assert!(!mentions_reviews("4.6"));
    }
}
