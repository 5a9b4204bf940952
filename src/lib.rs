//! Soundside - Outer Banks vacation rental data backend
//!
//! This library aggregates third-party place, review, weather, and geocoding
//! providers behind always-succeeding controllers that substitute bundled
//! sample data whenever a provider is unavailable, misconfigured, or
//! failing. Consumers receive normalized records with a provenance tag and
//! never have to branch on which source produced them.

pub mod api;
pub mod cache;
pub mod config;
pub mod directory;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod models;
pub mod places;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::{AppConfig, ProviderAvailability};
pub use directory::{DirectoryProvider, DirectoryService, LocationDetails, TripAdvisorClient};
pub use error::{InputError, ProviderError};
pub use geo::distance_miles;
pub use geocode::{GeocodeProvider, GeocodeResolver, GoogleGeocoder, REGION_CENTER};
pub use models::{
    Coordinates, ForecastDay, GeocodeResult, Place, Provenance, RankedPlace, Review,
    WeatherSnapshot,
};
pub use places::{GooglePlacesClient, PlaceKind, PlaceSearchProvider, PlacesService};
pub use weather::{LocationQuery, OpenWeatherClient, WeatherProvider, WeatherService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
