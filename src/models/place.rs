//! Normalized place records for attractions and restaurants

use serde::{Deserialize, Serialize};

use super::{Coordinates, Provenance};

/// One attraction or restaurant, normalized from any provider.
///
/// The identifier is opaque and unique within its provider plus the sample
/// catalog. Ratings outside [0, 5] and price tiers outside 1..=4 are dropped
/// at the adapter boundary before a record is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    /// Category tags ("tourist_attraction", "Seafood", ...)
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    /// Coarse address or neighborhood string
    pub vicinity: Option<String>,
    pub coordinates: Option<Coordinates>,
    /// Ordinal price tier, 1 (cheap) to 4 (splurge); restaurants only
    pub price_tier: Option<u8>,
    /// Time-sensitive and not guaranteed fresh
    pub open_now: Option<bool>,
    /// Photo URL or placeholder path
    pub image: Option<String>,
    pub provenance: Provenance,
}

/// A place plus its per-request distance annotation.
///
/// Distance is derived against the caller's resolved origin and never stored
/// on the record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPlace {
    #[serde(flatten)]
    pub place: Place,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

/// Keep a provider rating only when it lies in the valid 0..=5 range.
#[must_use]
pub fn valid_rating(value: f64) -> Option<f64> {
    if value.is_finite() && (0.0..=5.0).contains(&value) {
        Some(value)
    } else {
        None
    }
}

/// Keep a provider price level only when it maps onto the 1..=4 tiers.
#[must_use]
pub fn valid_price_tier(value: i64) -> Option<u8> {
    if (1..=4).contains(&value) {
        Some(value as u8)
    } else {
        None
    }
}
