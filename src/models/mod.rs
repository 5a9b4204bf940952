//! Data models for the Soundside backend
//!
//! This module contains the normalized record types produced by the
//! aggregation layer, organized by concern:
//! - Location: coordinates and geocoding results
//! - Place: attractions and restaurants
//! - Review: visitor reviews from the location directory
//! - Weather: current conditions and the five-day forecast

pub mod location;
pub mod place;
pub mod review;
pub mod weather;

use serde::{Deserialize, Serialize};

// Re-export all public types for convenient access
pub use location::{Coordinates, GeocodeResult};
pub use place::{Place, RankedPlace};
pub use review::Review;
pub use weather::{ForecastDay, WeatherSnapshot};

/// Where a returned record came from.
///
/// Every record in one response carries the same provenance; live and
/// fallback records are never mixed within a single batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Produced by a successful upstream provider call in this request.
    Live,
    /// Substituted from the bundled sample catalog.
    Fallback,
}

impl Provenance {
    #[must_use]
    pub fn is_fallback(self) -> bool {
        matches!(self, Provenance::Fallback)
    }
}
