//! Synthesized seasonal weather for when the live provider is out.
//!
//! The numbers follow the coastal climate of the service area: mild winters,
//! hot humid summers, steady onshore wind. Values are randomized within a
//! plausible band per request; each forecast day draws one base temperature
//! and derives high and low from it, so high never dips below low.

use chrono::{DateTime, Datelike, Duration, Utc};
use rand::RngExt;

use crate::models::weather::FORECAST_DAYS;
use crate::models::{Coordinates, ForecastDay, Provenance, WeatherSnapshot};

const FORECAST_CONDITIONS: &[(&str, &str)] = &[
    ("Clear", "01d"),
    ("Few Clouds", "02d"),
    ("Scattered Clouds", "03d"),
    ("Partly Cloudy", "02d"),
    ("Sunny", "01d"),
];

/// Seasonal defaults: base temperature, condition keyword, icon code.
fn seasonal_profile(month: u32) -> (i32, &'static str, &'static str) {
    match month {
        12 | 1 | 2 => (55, "Partly Cloudy", "02d"),
        3..=5 => (68, "Clear", "01d"),
        6..=8 => (82, "Sunny", "01d"),
        _ => (70, "Few Clouds", "02d"),
    }
}

/// Build a plausible snapshot for the given location and moment.
#[must_use]
pub fn synthesize(label: &str, coordinates: Coordinates, now: DateTime<Utc>) -> WeatherSnapshot {
    let mut rng = rand::rng();
    let (base_temp, condition, icon) = seasonal_profile(now.month());

    let forecast = (0..FORECAST_DAYS)
        .map(|index| {
            let date = now + Duration::days(index as i64);
            let day_temp = base_temp + rng.random_range(-5..5);
            let (day_condition, day_icon) =
                FORECAST_CONDITIONS[rng.random_range(0..FORECAST_CONDITIONS.len())];

            ForecastDay {
                day: if index == 0 {
                    "Today".to_string()
                } else {
                    date.format("%A").to_string()
                },
                date: date.format("%Y-%m-%d").to_string(),
                high_f: day_temp + 5,
                low_f: day_temp - 8,
                condition: day_condition.to_string(),
                icon: day_icon.to_string(),
                description: day_condition.to_lowercase(),
            }
        })
        .collect();

    WeatherSnapshot {
        location: label.to_string(),
        coordinates,
        temperature_f: base_temp + rng.random_range(-4..4),
        condition: condition.to_string(),
        description: condition.to_lowercase(),
        icon: icon.to_string(),
        humidity_pct: 65 + rng.random_range(0..20),
        wind_mph: 8 + rng.random_range(0..10),
        visibility_mi: 10,
        uv_index: rng.random_range(2..=10),
        provenance: Provenance::Fallback,
        forecast,
    }
}
