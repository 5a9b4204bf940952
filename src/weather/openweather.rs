//! OpenWeather OneCall 3.0 adapter

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use super::WeatherProvider;
use crate::config::AppConfig;
use crate::error::ProviderError;
use crate::models::weather::FORECAST_DAYS;
use crate::models::{Coordinates, ForecastDay, Provenance, WeatherSnapshot};

const ONECALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";
const WEATHER_TIMEOUT: Duration = Duration::from_secs(10);

/// Conversion factor, meters to statute miles.
const METERS_PER_MILE: f64 = 1609.34;

/// OpenWeather OneCall API client.
pub struct OpenWeatherClient {
    client: Client,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(WEATHER_TIMEOUT)
            .user_agent(concat!("Soundside/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.openweather_api_key.clone(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn current_and_forecast(
        &self,
        coordinates: &Coordinates,
        label: &str,
    ) -> Result<WeatherSnapshot, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::CredentialMissing)?;

        let url = format!(
            "{ONECALL_URL}?lat={}&lon={}&appid={api_key}&units=imperial&exclude=minutely,hourly,alerts",
            coordinates.latitude, coordinates.longitude
        );

        debug!("Fetching weather for {label:?}");
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            match status.as_u16() {
                401 => error!("weather authentication failed, key may be invalid or not activated"),
                403 => error!("weather access forbidden, subscription may be required"),
                _ => {}
            }
            return Err(ProviderError::Http(status.as_u16()));
        }

        let body: OneCallResponse = response.json().await?;
        normalize(body, coordinates, label)
    }
}

fn normalize(
    body: OneCallResponse,
    coordinates: &Coordinates,
    label: &str,
) -> Result<WeatherSnapshot, ProviderError> {
    let current_weather = body
        .current
        .weather
        .first()
        .ok_or_else(|| ProviderError::Parse("current conditions missing".to_string()))?;

    if body.daily.len() < FORECAST_DAYS {
        return Err(ProviderError::Parse(format!(
            "expected at least {FORECAST_DAYS} forecast days, got {}",
            body.daily.len()
        )));
    }

    let forecast = body
        .daily
        .iter()
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(index, day)| {
            let date = DateTime::<Utc>::from_timestamp(day.dt, 0).ok_or_else(|| {
                ProviderError::Parse(format!("invalid forecast timestamp {}", day.dt))
            })?;
            let condition = day
                .weather
                .first()
                .ok_or_else(|| ProviderError::Parse("forecast conditions missing".to_string()))?;

            Ok(ForecastDay {
                day: if index == 0 {
                    "Today".to_string()
                } else {
                    date.format("%A").to_string()
                },
                date: date.format("%Y-%m-%d").to_string(),
                high_f: day.temp.max.round() as i32,
                low_f: day.temp.min.round() as i32,
                condition: condition.main.clone(),
                icon: condition.icon.clone(),
                description: condition.description.clone(),
            })
        })
        .collect::<Result<Vec<_>, ProviderError>>()?;

    Ok(WeatherSnapshot {
        location: label.to_string(),
        coordinates: *coordinates,
        temperature_f: body.current.temp.round() as i32,
        condition: current_weather.main.clone(),
        description: current_weather.description.clone(),
        icon: current_weather.icon.clone(),
        humidity_pct: body.current.humidity.clamp(0.0, 100.0).round() as u8,
        wind_mph: body.current.wind_speed.max(0.0).round() as u32,
        visibility_mi: (body.current.visibility.unwrap_or(0.0) / METERS_PER_MILE).round()
            as u32,
        uv_index: body.current.uvi.max(0.0).round() as u8,
        provenance: Provenance::Live,
        forecast,
    })
}

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    current: RawCurrent,
    daily: Vec<RawDaily>,
}

#[derive(Debug, Deserialize)]
struct RawCurrent {
    temp: f64,
    humidity: f64,
    wind_speed: f64,
    /// Meters; absent under some conditions
    visibility: Option<f64>,
    uvi: f64,
    weather: Vec<RawCondition>,
}

#[derive(Debug, Deserialize)]
struct RawDaily {
    dt: i64,
    temp: RawDailyTemp,
    weather: Vec<RawCondition>,
}

#[derive(Debug, Deserialize)]
struct RawDailyTemp {
    max: f64,
    min: f64,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    main: String,
    description: String,
    icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition() -> RawCondition {
        RawCondition {
            main: "Clear".to_string(),
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
        }
    }

    fn one_call_response(days: usize) -> OneCallResponse {
        OneCallResponse {
            current: RawCurrent {
                temp: 74.6,
                humidity: 68.0,
                wind_speed: 11.3,
                visibility: Some(16093.4),
                uvi: 6.2,
                weather: vec![condition()],
            },
            daily: (0..days)
                .map(|i| RawDaily {
                    // 2025-06-01T12:00:00Z plus one day per entry
                    dt: 1_748_779_200 + (i as i64) * 86_400,
                    temp: RawDailyTemp {
                        max: 80.0 + i as f64,
                        min: 65.0 + i as f64,
                    },
                    weather: vec![condition()],
                })
                .collect(),
        }
    }

    #[test]
    fn test_normalize_converts_units_and_labels() {
        let coords = Coordinates::new(35.9582, -75.6201);
        let snapshot = normalize(one_call_response(8), &coords, "Nags Head, NC").unwrap();

        assert_eq!(snapshot.temperature_f, 75);
        assert_eq!(snapshot.humidity_pct, 68);
        assert_eq!(snapshot.wind_mph, 11);
        assert_eq!(snapshot.visibility_mi, 10);
        assert_eq!(snapshot.uv_index, 6);
        assert_eq!(snapshot.provenance, Provenance::Live);
        assert_eq!(snapshot.forecast.len(), FORECAST_DAYS);
        assert_eq!(snapshot.forecast[0].day, "Today");
        assert_ne!(snapshot.forecast[1].day, "Today");
        assert!(snapshot.forecast[0].date.starts_with("2025-"));
    }

    #[test]
    fn test_normalize_rejects_short_forecast() {
        let coords = Coordinates::new(35.9582, -75.6201);
        let result = normalize(one_call_response(3), &coords, "Nags Head, NC");
        assert!(matches!(result, Err(ProviderError::Parse(_))));
    }

    #[test]
    fn test_normalize_rejects_missing_conditions() {
        let coords = Coordinates::new(35.9582, -75.6201);
        let mut body = one_call_response(6);
        body.current.weather.clear();
        assert!(matches!(
            normalize(body, &coords, "Nags Head, NC"),
            Err(ProviderError::Parse(_))
        ));
    }
}
