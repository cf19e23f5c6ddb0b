//! Phone number, normalized to digits with an optional leading `+`.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::strategy::{FieldChain, Source, Strategy};

use super::ascii_digits;

static VALID_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{10,}$").expect("valid regex"));

/// Patterns tried against the listing text, in order.
const PHONE_PATTERNS: [(&str, &str); 4] = [
    ("grouped-local", r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}"),
    ("international", r"\d{2,4}[-.\s]?\d{3}[-.\s]?\d{4}"),
    ("plain-digits", r"\d{10,15}"),
    (
        "country-code",
        r"\+?\d{1,4}[-.\s]?\(?\d{1,4}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,4}",
    ),
];

/// Strips everything but digits and `+`, writing digits in ASCII.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    ascii_digits(raw)
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    VALID_PHONE.is_match(phone)
}

/// First match of `pattern` in `text` that normalizes to a valid number.
#[must_use]
pub fn find_phone(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .find_iter(text)
        .map(|m| normalize_phone(m.as_str()))
        .find(|phone| is_valid_phone(phone))
}

#[must_use]
pub fn chain() -> FieldChain<String> {
    PHONE_PATTERNS
        .iter()
        .fold(FieldChain::new("phone"), |chain, &(name, pattern)| {
            let re = Regex::new(pattern).expect("valid regex");
            chain.then(Strategy::new(name, Source::NodeText, move |text| {
                find_phone(&re, text)
            }))
        })
}
