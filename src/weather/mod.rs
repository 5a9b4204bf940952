//! Weather aggregation
//!
//! Resolves the caller's location, asks the live weather provider for
//! current conditions and the five-day outlook, and synthesizes a seasonal
//! snapshot when the provider is unavailable or failing. Always returns a
//! usable snapshot.

pub mod fallback;
pub mod openweather;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::error::{InputError, ProviderError};
use crate::geocode::{GeocodeProvider, GeocodeResolver};
use crate::models::{Coordinates, WeatherSnapshot};

pub use openweather::OpenWeatherClient;

/// How a caller names the place they want weather for.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free text, resolved through the geocoding tiers
    Address(String),
    /// Raw coordinates, validated but not geocoded
    Coordinates(Coordinates),
}

/// A live weather backend.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Whether the provider credential was present at startup.
    fn is_available(&self) -> bool;

    async fn current_and_forecast(
        &self,
        coordinates: &Coordinates,
        label: &str,
    ) -> Result<WeatherSnapshot, ProviderError>;
}

/// Aggregation controller for the weather domain.
pub struct WeatherService<G, W> {
    resolver: GeocodeResolver<G>,
    provider: W,
}

impl<G: GeocodeProvider, W: WeatherProvider> WeatherService<G, W> {
    pub fn new(resolver: GeocodeResolver<G>, provider: W) -> Self {
        Self { resolver, provider }
    }

    /// Current conditions and forecast for a location.
    ///
    /// Provider failures degrade to the synthesized seasonal snapshot; only
    /// malformed caller input surfaces as an error.
    pub async fn snapshot(&self, query: LocationQuery) -> Result<WeatherSnapshot, InputError> {
        let (coordinates, label) = match query {
            LocationQuery::Address(address) => {
                if address.trim().is_empty() {
                    return Err(InputError::EmptyLocation);
                }
                let resolved = self.resolver.resolve(&address).await;
                (resolved.coordinates, resolved.formatted_address)
            }
            LocationQuery::Coordinates(coordinates) => {
                coordinates.validate()?;
                (coordinates, coordinates.format())
            }
        };

        if !self.provider.is_available() {
            info!("weather provider unavailable, synthesizing snapshot");
            return Ok(fallback::synthesize(&label, coordinates, Utc::now()));
        }

        match self.provider.current_and_forecast(&coordinates, &label).await {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                warn!(error = %err, "weather fetch failed, synthesizing snapshot");
                Ok(fallback::synthesize(&label, coordinates, Utc::now()))
            }
        }
    }
}
