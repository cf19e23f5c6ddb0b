use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bookkeeping row a caller persists for one location search.
///
/// The correlation id links this row to the clinic records saved for the
/// same search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSession {
    pub search_id: Uuid,
    pub location: String,
    pub searched_at: DateTime<Utc>,
    pub clinics_found: usize,
}

impl SearchSession {
    #[must_use]
    pub fn new(search_id: Uuid, location: impl Into<String>, clinics_found: usize) -> Self {
        Self {
            search_id,
            location: location.into(),
            searched_at: Utc::now(),
            clinics_found,
        }
    }
}
