//! Geocoding resolver
//!
//! Resolves a free-text location to coordinates with three-tier degradation:
//! live Google Geocoding, then a static table of the service area's own
//! towns, then the regional default center. Resolution never fails, because
//! a geocoding failure must not cascade into total failure of the weather or
//! places features.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::ProviderError;
use crate::models::{Coordinates, GeocodeResult, Provenance};

const GEOCODING_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const GEOCODE_TIMEOUT: Duration = Duration::from_secs(8);

/// Nominal center of the service area (Nags Head, NC), the final tier when
/// nothing else matches.
pub const REGION_CENTER: Coordinates = Coordinates {
    latitude: 35.9582,
    longitude: -75.6201,
};

/// Static coordinates for the service area's towns, used when the live
/// geocoder is unavailable. Lookups are case-sensitive exact matches.
const TOWN_COORDS: &[(&str, f64, f64)] = &[
    ("Corolla, NC", 36.3762, -75.8269),
    ("Duck, NC", 36.1626, -75.7463),
    ("Southern Shores, NC", 36.1162, -75.7199),
    ("Kitty Hawk, NC", 36.0626, -75.7016),
    ("Kill Devil Hills, NC", 36.0162, -75.6699),
    ("Nags Head, NC", 35.9582, -75.6201),
    ("Manteo, NC", 35.9087, -75.6699),
    ("Wanchese, NC", 35.8418, -75.6516),
    ("Rodanthe, NC", 35.5918, -75.4682),
    ("Waves, NC", 35.5851, -75.4607),
    ("Salvo, NC", 35.5451, -75.4296),
    ("Avon, NC", 35.3518, -75.5032),
    ("Buxton, NC", 35.2518, -75.5277),
    ("Frisco, NC", 35.2368, -75.6277),
    ("Hatteras Village, NC", 35.2087, -75.6877),
    ("Ocracoke, NC", 35.1151, -75.9877),
];

/// A live geocoding backend.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<GeocodeResult, ProviderError>;
}

/// Google Geocoding API client. Shares its credential with the Places
/// provider.
pub struct GoogleGeocoder {
    client: Client,
    api_key: Option<String>,
}

impl GoogleGeocoder {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(GEOCODE_TIMEOUT)
            .user_agent(concat!("Soundside/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.google_maps_api_key.clone(),
        }
    }
}

#[async_trait]
impl GeocodeProvider for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeocodeResult, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::CredentialMissing)?;

        let url = format!(
            "{GEOCODING_URL}?address={}&key={api_key}",
            urlencoding::encode(address)
        );

        debug!("Geocoding {address:?}");
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(response.status().as_u16()));
        }

        let body: GeocodingResponse = response.json().await?;

        let first = body
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(ProviderError::Empty)?;

        let coordinates = Coordinates::new(
            first.geometry.location.lat,
            first.geometry.location.lng,
        );
        coordinates
            .validate()
            .map_err(|err| ProviderError::Parse(err.to_string()))?;

        Ok(GeocodeResult {
            coordinates,
            formatted_address: first.formatted_address,
            provenance: Provenance::Live,
        })
    }
}

/// Three-tier resolver over any live backend.
pub struct GeocodeResolver<G> {
    provider: G,
}

impl<G: GeocodeProvider> GeocodeResolver<G> {
    pub fn new(provider: G) -> Self {
        Self { provider }
    }

    /// Resolve an address to coordinates. Always produces a usable result.
    pub async fn resolve(&self, address: &str) -> GeocodeResult {
        match self.provider.geocode(address).await {
            Ok(result) => {
                debug!(
                    "Geocoded {address:?} to {}",
                    result.coordinates.format()
                );
                result
            }
            Err(err) => {
                warn!(error = %err, "live geocoding unavailable for {address:?}, using static lookup");
                offline_lookup(address)
            }
        }
    }
}

/// Static table lookup with the regional center as the last resort.
fn offline_lookup(address: &str) -> GeocodeResult {
    let coordinates = TOWN_COORDS
        .iter()
        .find(|(town, _, _)| *town == address)
        .map_or(REGION_CENTER, |(_, lat, lng)| Coordinates::new(*lat, *lng));

    GeocodeResult {
        coordinates,
        formatted_address: address.to_string(),
        provenance: Provenance::Fallback,
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingEntry>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingEntry {
    formatted_address: String,
    geometry: GeocodingGeometry,
}

#[derive(Debug, Deserialize)]
struct GeocodingGeometry {
    location: GeocodingLatLng,
}

#[derive(Debug, Deserialize)]
struct GeocodingLatLng {
    lat: f64,
    lng: f64,
}
