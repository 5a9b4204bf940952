//! Location directory aggregation (attractions, restaurants, reviews)
//!
//! Wraps the TripAdvisor-style content directory keyed by opaque location
//! ids, with the standard fallback ladder and an optional 24 hour
//! read-through cache on the live path. Per-place review fetches fan out
//! with bounded concurrency instead of looping serially.

pub mod fallback;
pub mod tripadvisor;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cache;
use crate::error::{InputError, ProviderError};
use crate::models::{Place, Provenance, Review};
use crate::places::validate_limit;

pub use tripadvisor::TripAdvisorClient;

/// Directory ids for the service area, slug to provider location id.
pub const OUTER_BANKS_LOCATION_IDS: &[(&str, &str)] = &[
    ("outer-banks", "49022"),
    ("nags-head", "58541"),
    ("kill-devil-hills", "49256"),
    ("kitty-hawk", "49253"),
    ("duck", "49242"),
    ("corolla", "49233"),
    ("hatteras", "49248"),
    ("ocracoke", "49265"),
    ("manteo", "49260"),
    ("rodanthe", "49270"),
    ("buxton", "49229"),
    ("avon", "49223"),
    ("waves", "1815223"),
    ("salvo", "3476045"),
    ("frisco", "49245"),
];

/// The main region id, used when a caller does not narrow the location.
pub const DEFAULT_LOCATION_ID: &str = "49022";

/// Live-path cache TTL; entries are revalidated daily.
const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Concurrent per-place review fetches in one fan-out.
const REVIEW_FANOUT: usize = 10;

/// Directory metadata for one location id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDetails {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub web_url: Option<String>,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub provenance: Provenance,
}

/// Look up the directory id for a service-area slug.
#[must_use]
pub fn location_id_for(slug: &str) -> Option<&'static str> {
    OUTER_BANKS_LOCATION_IDS
        .iter()
        .find(|(name, _)| *name == slug)
        .map(|(_, id)| *id)
}

/// Directory ids are opaque but numeric; anything else is a caller bug.
pub fn validate_location_id(location_id: &str) -> Result<(), InputError> {
    if location_id.is_empty() || !location_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::InvalidLocationId(location_id.to_string()));
    }
    Ok(())
}

/// A live location-directory backend.
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    /// Whether the provider credential was present at startup.
    fn is_available(&self) -> bool;

    async fn attractions(
        &self,
        location_id: &str,
        limit: usize,
    ) -> Result<Vec<Place>, ProviderError>;

    async fn restaurants(
        &self,
        location_id: &str,
        limit: usize,
    ) -> Result<Vec<Place>, ProviderError>;

    async fn reviews(&self, location_id: &str, limit: usize)
    -> Result<Vec<Review>, ProviderError>;

    async fn location_details(&self, location_id: &str)
    -> Result<LocationDetails, ProviderError>;
}

/// Aggregation controller for the directory domain.
pub struct DirectoryService<P> {
    provider: P,
}

impl<P: DirectoryProvider> DirectoryService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Attractions listed under a directory location id.
    pub async fn attractions(
        &self,
        location_id: &str,
        limit: usize,
    ) -> Result<(Vec<Place>, Provenance), InputError> {
        validate_location_id(location_id)?;
        validate_limit(limit)?;

        if !self.provider.is_available() {
            info!("directory unavailable, serving sample attractions");
            return Ok((fallback::attractions(limit), Provenance::Fallback));
        }

        let key = cache_key("attractions", location_id, limit);
        if let Some(cached) = cache_lookup::<Vec<Place>>(&key).await {
            return Ok((cached, Provenance::Live));
        }

        match self.provider.attractions(location_id, limit).await {
            Ok(places) if !places.is_empty() => {
                cache_store(&key, places.clone()).await;
                Ok((places, Provenance::Live))
            }
            Ok(_) => {
                warn!(location_id, "directory returned no attractions, serving samples");
                Ok((fallback::attractions(limit), Provenance::Fallback))
            }
            Err(err) => {
                warn!(location_id, error = %err, "attractions fetch failed, serving samples");
                Ok((fallback::attractions(limit), Provenance::Fallback))
            }
        }
    }

    /// Restaurants listed under a directory location id.
    pub async fn restaurants(
        &self,
        location_id: &str,
        limit: usize,
    ) -> Result<(Vec<Place>, Provenance), InputError> {
        validate_location_id(location_id)?;
        validate_limit(limit)?;

        if !self.provider.is_available() {
            info!("directory unavailable, serving sample restaurants");
            return Ok((fallback::restaurants(limit), Provenance::Fallback));
        }

        let key = cache_key("restaurants", location_id, limit);
        if let Some(cached) = cache_lookup::<Vec<Place>>(&key).await {
            return Ok((cached, Provenance::Live));
        }

        match self.provider.restaurants(location_id, limit).await {
            Ok(places) if !places.is_empty() => {
                cache_store(&key, places.clone()).await;
                Ok((places, Provenance::Live))
            }
            Ok(_) => {
                warn!(location_id, "directory returned no restaurants, serving samples");
                Ok((fallback::restaurants(limit), Provenance::Fallback))
            }
            Err(err) => {
                warn!(location_id, error = %err, "restaurants fetch failed, serving samples");
                Ok((fallback::restaurants(limit), Provenance::Fallback))
            }
        }
    }

    /// Reviews for one directory location id.
    pub async fn reviews(
        &self,
        location_id: &str,
        limit: usize,
    ) -> Result<(Vec<Review>, Provenance), InputError> {
        validate_location_id(location_id)?;
        validate_limit(limit)?;

        if !self.provider.is_available() {
            info!("directory unavailable, serving sample reviews");
            return Ok((fallback::reviews(location_id, limit), Provenance::Fallback));
        }

        let key = cache_key("reviews", location_id, limit);
        if let Some(cached) = cache_lookup::<Vec<Review>>(&key).await {
            return Ok((cached, Provenance::Live));
        }

        match self.provider.reviews(location_id, limit).await {
            Ok(reviews) if !reviews.is_empty() => {
                cache_store(&key, reviews.clone()).await;
                Ok((reviews, Provenance::Live))
            }
            Ok(_) => {
                warn!(location_id, "directory returned no reviews, serving samples");
                Ok((fallback::reviews(location_id, limit), Provenance::Fallback))
            }
            Err(err) => {
                warn!(location_id, error = %err, "reviews fetch failed, serving samples");
                Ok((fallback::reviews(location_id, limit), Provenance::Fallback))
            }
        }
    }

    /// Reviews for many places at once, fetched with bounded concurrency.
    ///
    /// Results are re-associated with their originating place by id, never
    /// by completion order, so the output is deterministic regardless of
    /// network scheduling.
    pub async fn reviews_for_places(
        &self,
        location_ids: &[String],
        per_limit: usize,
    ) -> Result<HashMap<String, (Vec<Review>, Provenance)>, InputError> {
        for location_id in location_ids {
            validate_location_id(location_id)?;
        }
        validate_limit(per_limit)?;

        let results: Vec<(String, (Vec<Review>, Provenance))> =
            stream::iter(location_ids.iter().cloned())
                .map(|location_id| async move {
                    // Validation already happened for the whole batch
                    let batch = self
                        .reviews(&location_id, per_limit)
                        .await
                        .unwrap_or_else(|_| (Vec::new(), Provenance::Fallback));
                    (location_id, batch)
                })
                .buffer_unordered(REVIEW_FANOUT)
                .collect()
                .await;

        Ok(results.into_iter().collect())
    }

    /// Directory metadata for one location id.
    pub async fn location_details(
        &self,
        location_id: &str,
    ) -> Result<(LocationDetails, Provenance), InputError> {
        validate_location_id(location_id)?;

        if !self.provider.is_available() {
            return Ok((fallback::location_details(location_id), Provenance::Fallback));
        }

        match self.provider.location_details(location_id).await {
            Ok(details) => Ok((details, Provenance::Live)),
            Err(err) => {
                warn!(location_id, error = %err, "details fetch failed, serving sample");
                Ok((fallback::location_details(location_id), Provenance::Fallback))
            }
        }
    }
}

fn cache_key(operation: &str, location_id: &str, limit: usize) -> String {
    format!("directory:{operation}:{location_id}:{limit}")
}

/// Cache read on the live path only; any cache trouble is a miss.
async fn cache_lookup<T: serde::de::DeserializeOwned + Send + 'static>(key: &str) -> Option<T> {
    match cache::get::<T>(key).await {
        Ok(hit) => hit,
        Err(err) => {
            debug!(key, error = %err, "cache read failed, treating as miss");
            None
        }
    }
}

async fn cache_store<T: serde::Serialize + Send + std::fmt::Debug + 'static>(
    key: &str,
    value: T,
) {
    if let Err(err) = cache::put(key, value, CACHE_TTL).await {
        debug!(key, error = %err, "cache write failed");
    }
}
