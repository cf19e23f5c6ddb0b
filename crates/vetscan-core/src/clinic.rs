//! Clinic listing records produced by a directory search.

use serde::{Serialize, Serializer};

/// Marker emitted in place of any field value that could not be extracted.
pub const NOT_AVAILABLE: &str = "not available";

/// A field value that is either present or explicitly marked unavailable.
///
/// Absence is never encoded as `null` or an empty string: serialization
/// writes the value itself or the [`NOT_AVAILABLE`] marker.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Extracted<T> {
    Found(T),
    #[default]
    NotAvailable,
}

impl<T> Extracted<T> {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Extracted::Found(_))
    }

    #[must_use]
    pub fn as_found(&self) -> Option<&T> {
        match self {
            Extracted::Found(value) => Some(value),
            Extracted::NotAvailable => None,
        }
    }
}

impl<T> From<Option<T>> for Extracted<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Extracted::NotAvailable, Extracted::Found)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Extracted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Extracted::Found(value) => value.fmt(f),
            Extracted::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl<T: Serialize> Serialize for Extracted<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Extracted::Found(value) => value.serialize(serializer),
            Extracted::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// One veterinary clinic listing as extracted from the results feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicRecord {
    /// Display name. Always present: listings without a usable name are
    /// dropped before a record is built.
    pub name: String,
    /// Star rating in `[0, 5]`.
    pub rating: Extracted<f64>,
    /// Free text carrying the review count, e.g. `"(128 reviews)"`.
    pub review_count_text: Extracted<String>,
    pub address: Extracted<String>,
    /// Digits with an optional leading `+`, at least 10 digits long.
    pub phone: Extracted<String>,
    pub hours: Extracted<String>,
    /// Absolute `http(s)` URL outside the directory platform's own domain.
    pub website: Extracted<String>,
}

impl ClinicRecord {
    /// A record with only a name; every other field is unavailable.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rating: Extracted::NotAvailable,
            review_count_text: Extracted::NotAvailable,
            address: Extracted::NotAvailable,
            phone: Extracted::NotAvailable,
            hours: Extracted::NotAvailable,
            website: Extracted::NotAvailable,
        }
    }
}
