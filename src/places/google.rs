//! Google Places Nearby Search adapter

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{PlaceKind, PlaceSearchProvider};
use crate::config::AppConfig;
use crate::error::ProviderError;
use crate::models::place::{valid_price_tier, valid_rating};
use crate::models::{Coordinates, Place, Provenance};

const PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=300&width=400";

/// Google Places API client.
///
/// One Nearby Search request is issued per category type of the requested
/// kind; deduplication across categories happens in the controller.
pub struct GooglePlacesClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GooglePlacesClient {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .user_agent(concat!("Soundside/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.google_maps_api_key.clone(),
            base_url: PLACES_BASE_URL.to_string(),
        }
    }

    /// Photo URL for a place photo reference, or the bundled placeholder
    /// when no credential is configured.
    #[must_use]
    pub fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        match &self.api_key {
            Some(key) => format!(
                "{}/photo?maxwidth={max_width}&photo_reference={photo_reference}&key={key}",
                self.base_url
            ),
            None => PLACEHOLDER_IMAGE.to_string(),
        }
    }

    async fn search_type(
        &self,
        type_name: &str,
        center: &Coordinates,
        radius_m: u32,
        api_key: &str,
    ) -> Result<Vec<RawPlace>, ProviderError> {
        let url = format!(
            "{}/nearbysearch/json?location={},{}&radius={radius_m}&type={type_name}&key={api_key}",
            self.base_url, center.latitude, center.longitude
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(response.status().as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.results.unwrap_or_default())
    }

    fn normalize(&self, raw: RawPlace) -> Option<Place> {
        let coordinates = raw.geometry.map(|geometry| {
            Coordinates::new(geometry.location.lat, geometry.location.lng)
        });
        let coordinates = match coordinates {
            Some(coords) if coords.validate().is_err() => {
                warn!("dropping invalid coordinates on place {:?}", raw.place_id);
                None
            }
            other => other,
        };

        let image = raw
            .photos
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|photo| self.photo_url(&photo.photo_reference, 400));

        Some(Place {
            id: raw.place_id?,
            name: raw.name?,
            tags: raw.types.unwrap_or_default(),
            rating: raw.rating.and_then(valid_rating),
            review_count: raw.user_ratings_total,
            vicinity: raw.vicinity,
            coordinates,
            price_tier: raw.price_level.and_then(valid_price_tier),
            open_now: raw.opening_hours.and_then(|hours| hours.open_now),
            image,
            provenance: Provenance::Live,
        })
    }
}

#[async_trait]
impl PlaceSearchProvider for GooglePlacesClient {
    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(
        &self,
        kind: PlaceKind,
        center: &Coordinates,
        radius_m: u32,
    ) -> Result<Vec<Place>, ProviderError> {
        let api_key = self
            .api_key
            .clone()
            .ok_or(ProviderError::CredentialMissing)?;

        let mut collected = Vec::new();
        let mut last_error = None;

        for type_name in kind.category_types() {
            match self
                .search_type(type_name, center, radius_m, &api_key)
                .await
            {
                Ok(results) => {
                    debug!("Found {} {type_name} results", results.len());
                    collected.extend(results);
                }
                Err(err) => {
                    // One category failing should not sink the others
                    warn!(error = %err, "search for {type_name} failed");
                    last_error = Some(err);
                }
            }
        }

        if collected.is_empty() {
            if let Some(err) = last_error {
                return Err(err);
            }
        }

        Ok(collected
            .into_iter()
            .filter_map(|raw| self.normalize(raw))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Option<Vec<RawPlace>>,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    place_id: Option<String>,
    name: Option<String>,
    rating: Option<f64>,
    user_ratings_total: Option<u32>,
    price_level: Option<i64>,
    photos: Option<Vec<RawPhoto>>,
    vicinity: Option<String>,
    types: Option<Vec<String>>,
    geometry: Option<RawGeometry>,
    opening_hours: Option<RawOpeningHours>,
}

#[derive(Debug, Deserialize)]
struct RawPhoto {
    photo_reference: String,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    location: RawLatLng,
}

#[derive(Debug, Deserialize)]
struct RawLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct RawOpeningHours {
    open_now: Option<bool>,
}
