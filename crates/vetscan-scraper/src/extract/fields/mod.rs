//! Per-field strategy chains.
//!
//! Selectors target the platform's listing markup and are ordered from most
//! to least specific. Each module exposes its chain builder and the
//! predicate used to validate candidates.

pub mod address;
pub mod hours;
pub mod name;
pub mod phone;
pub mod rating;
pub mod reviews;
pub mod website;

/// Case-insensitive containment of any of `keywords` (given in lower case).
pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Zero code points of the decimal digit runs folded by [`ascii_digit`].
const DIGIT_ZEROS: [char; 6] = [
    '0',
    '\u{0660}', // Arabic-Indic
    '\u{06F0}', // Extended Arabic-Indic (Persian, Urdu)
    '\u{0966}', // Devanagari
    '\u{09E6}', // Bengali
    '\u{FF10}', // Fullwidth
];

/// The ASCII digit `c` stands for, if `c` is a decimal digit.
pub(crate) fn ascii_digit(c: char) -> Option<char> {
    DIGIT_ZEROS
        .iter()
        .find_map(|&zero| char::from_digit(u32::from(c).checked_sub(u32::from(zero))?, 10))
}

/// Rewrites decimal digits to ASCII and the Arabic decimal separator `٫`
/// to `.`; everything else is kept.
pub(crate) fn ascii_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{066B}' => '.',
            c => ascii_digit(c).unwrap_or(c),
        })
        .collect()
}
