//! Star rating.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::strategy::{FieldChain, Source, Strategy};

use super::ascii_digits;

const RATING_SELECTORS: [&str; 5] = [
    "[aria-label*='stars']",
    "[class*='rating']",
    "span[aria-label*='.']",
    "div[aria-label*='stars']",
    "span[class*='fontBodyMedium']",
];

pub const MAX_RATING: f64 = 5.0;

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.[0-9]+").expect("valid regex"));
static LOOSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.?[0-9]?").expect("valid regex"));

/// Reads a rating out of a label such as `"4.6 stars 1,024 Reviews"`.
///
/// The first decimal number wins; failing that, the first loose number is
/// used when it is at most 5. The result always lies in `[0, 5]`.
/// Non-ASCII decimal digits are read by value.
#[must_use]
pub fn parse_rating(label: &str) -> Option<f64> {
    let label = ascii_digits(label);
    let label = label.as_str();
    let value = match DECIMAL.find(label) {
        Some(m) => m.as_str().parse::<f64>().ok()?,
        None => {
            let value = LOOSE_NUMBER.find(label)?.as_str().parse::<f64>().ok()?;
            if value > MAX_RATING {
                return None;
            }
            value
        }
    };
    (0.0..=MAX_RATING).contains(&value).then_some(value)
}

#[must_use]
pub fn chain() -> FieldChain<f64> {
    RATING_SELECTORS.iter().fold(FieldChain::new("rating"), |chain, &sel| {
        chain.then(Strategy::new(sel, Source::LabelOrText(sel), parse_rating))
    })
}
