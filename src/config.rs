//! Configuration for the Soundside backend
//!
//! Credentials are read from the environment exactly once at process start
//! into an explicit config struct that is injected into every adapter
//! constructor. A missing or empty credential means the provider is
//! permanently unavailable for this process; availability is never
//! re-checked mid-request.

use std::env;
use std::path::PathBuf;

/// Environment variable holding the shared Google key (Places + Geocoding).
pub const GOOGLE_MAPS_API_KEY: &str = "GOOGLE_MAPS_API_KEY";
/// Environment variable holding the OpenWeather key.
pub const OPENWEATHER_API_KEY: &str = "OPENWEATHER_API_KEY";
/// Environment variable holding the TripAdvisor Content API key.
pub const TRIPADVISOR_API_KEY: &str = "TRIPADVISOR_API_KEY";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CACHE_DIR: &str = ".soundside-cache";

/// Application configuration snapshot.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared credential for the Places and Geocoding providers
    pub google_maps_api_key: Option<String>,
    pub openweather_api_key: Option<String>,
    pub tripadvisor_api_key: Option<String>,
    pub port: u16,
    pub cache_dir: PathBuf,
}

/// Per-provider availability derived from the credential snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ProviderAvailability {
    pub places: bool,
    pub geocoding: bool,
    pub weather: bool,
    pub directory: bool,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values collapse to `None` so an exported-but-blank credential
    /// behaves the same as an absent one.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            google_maps_api_key: non_empty(GOOGLE_MAPS_API_KEY),
            openweather_api_key: non_empty(OPENWEATHER_API_KEY),
            tripadvisor_api_key: non_empty(TRIPADVISOR_API_KEY),
            port: non_empty("PORT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            cache_dir: non_empty("SOUNDSIDE_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
        }
    }

    /// Availability snapshot for logging and the short-circuit checks.
    #[must_use]
    pub fn availability(&self) -> ProviderAvailability {
        ProviderAvailability {
            places: self.google_maps_api_key.is_some(),
            geocoding: self.google_maps_api_key.is_some(),
            weather: self.openweather_api_key.is_some(),
            directory: self.tripadvisor_api_key.is_some(),
        }
    }
}
