//! Coordinates and geocoding result types

use serde::{Deserialize, Serialize};

use super::Provenance;
use crate::error::InputError;

/// A WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both components are finite and within WGS84 bounds.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(InputError::InvalidCoordinate(format!(
                "latitude {} out of range",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(InputError::InvalidCoordinate(format!(
                "longitude {} out of range",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Format as a "lat, lng" display string
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Result of resolving a free-text location to coordinates.
///
/// Computed per request and discarded; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub coordinates: Coordinates,
    pub formatted_address: String,
    pub provenance: Provenance,
}
