//! Weather snapshot and forecast types

use serde::{Deserialize, Serialize};

use super::{Coordinates, Provenance};

/// Number of forecast entries in every snapshot, starting from today.
pub const FORECAST_DAYS: usize = 5;

/// Current conditions plus the five-day outlook for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Resolved display label for the location
    pub location: String,
    pub coordinates: Coordinates,
    /// Current temperature in whole degrees Fahrenheit
    pub temperature_f: i32,
    /// Condition keyword ("Clear", "Rain", ...)
    pub condition: String,
    pub description: String,
    /// Provider icon code, renderable via [`WeatherSnapshot::icon_url`]
    pub icon: String,
    /// Relative humidity, 0..=100
    pub humidity_pct: u8,
    /// Sustained wind in mph
    pub wind_mph: u32,
    /// Visibility in statute miles
    pub visibility_mi: u32,
    /// Conventional 0..=11 range; source data is not strictly clamped
    pub uv_index: u8,
    pub provenance: Provenance,
    /// Always exactly [`FORECAST_DAYS`] entries, ordered from today
    pub forecast: Vec<ForecastDay>,
}

/// One day of the forecast sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// "Today", then weekday names
    pub day: String,
    /// ISO calendar date
    pub date: String,
    pub high_f: i32,
    pub low_f: i32,
    pub condition: String,
    pub icon: String,
    pub description: String,
}

impl WeatherSnapshot {
    /// Icon image URL for the stored icon code
    #[must_use]
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}
