//! Normalized visitor review records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Provenance;

/// One visitor review for a directory location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Whole-star rating, always 1..=5
    pub rating: u8,
    pub published: DateTime<Utc>,
    pub author: String,
    pub provenance: Provenance,
}

/// Keep a provider review rating only when it is a whole star in 1..=5.
#[must_use]
pub fn valid_review_rating(value: i64) -> Option<u8> {
    if (1..=5).contains(&value) {
        Some(value as u8)
    } else {
        None
    }
}
