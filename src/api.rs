//! HTTP API consumed by the rendering front-end
//!
//! Every listing endpoint returns a uniform, always-populated body plus an
//! advisory `note` when sample data was substituted. Provider failures never
//! surface as error statuses; only malformed caller input produces a 400.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::directory::{
    DEFAULT_LOCATION_ID, DirectoryService, LocationDetails, TripAdvisorClient, location_id_for,
};
use crate::error::InputError;
use crate::geocode::{GeocodeResolver, GoogleGeocoder};
use crate::models::{Coordinates, Place, Provenance, RankedPlace, Review, WeatherSnapshot};
use crate::places::{GooglePlacesClient, PlaceKind, PlacesService};
use crate::weather::{LocationQuery, OpenWeatherClient, WeatherService};

const DEFAULT_PLACES_LOCATION: &str = "Outer Banks, NC";
const DEFAULT_WEATHER_LOCATION: &str = "Nags Head, NC";
const DEFAULT_PLACE_LIMIT: usize = 10;
const DEFAULT_REVIEW_LIMIT: usize = 5;

/// Shared service state, built once at startup from the config snapshot.
pub struct AppState {
    pub places: PlacesService<GoogleGeocoder, GooglePlacesClient>,
    pub directory: DirectoryService<TripAdvisorClient>,
    pub weather: WeatherService<GoogleGeocoder, OpenWeatherClient>,
}

impl AppState {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            places: PlacesService::new(
                GeocodeResolver::new(GoogleGeocoder::new(config)),
                GooglePlacesClient::new(config),
            ),
            directory: DirectoryService::new(TripAdvisorClient::new(config)),
            weather: WeatherService::new(
                GeocodeResolver::new(GoogleGeocoder::new(config)),
                OpenWeatherClient::new(config),
            ),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/attractions", get(nearby_attractions))
        .route("/restaurants", get(nearby_restaurants))
        .route("/tripadvisor/attractions", get(directory_attractions))
        .route("/tripadvisor/restaurants", get(directory_restaurants))
        .route("/tripadvisor/reviews", get(directory_reviews))
        .route("/tripadvisor/reviews/batch", get(directory_reviews_batch))
        .route("/tripadvisor/details", get(directory_details))
        .route("/weather", get(weather))
        .route("/create-checkout-session", post(create_checkout_session))
        .with_state(state)
}

// ─── Response envelope ───────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl<T> ListResponse<T> {
    fn new(data: T, provenance: Provenance, domain: &str) -> Self {
        Self {
            success: true,
            data,
            note: fallback_note(provenance, domain),
        }
    }
}

fn fallback_note(provenance: Provenance, domain: &str) -> Option<String> {
    provenance.is_fallback().then(|| {
        format!("Showing sample {domain} data; live results are currently unavailable.")
    })
}

#[derive(Serialize)]
struct ApiErrorBody {
    success: bool,
    error: String,
}

pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            success: false,
            error: self.1,
        };
        (self.0, Json(body)).into_response()
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        ApiError(StatusCode::BAD_REQUEST, err.to_string())
    }
}

// ─── Nearby places (free-text location) ──────────────────────────

#[derive(Debug, Deserialize)]
struct NearbyQuery {
    location: Option<String>,
    limit: Option<usize>,
}

async fn nearby_attractions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<ListResponse<Vec<RankedPlace>>>, ApiError> {
    nearby(state, query, PlaceKind::Attraction).await
}

async fn nearby_restaurants(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<ListResponse<Vec<RankedPlace>>>, ApiError> {
    nearby(state, query, PlaceKind::Restaurant).await
}

async fn nearby(
    state: Arc<AppState>,
    query: NearbyQuery,
    kind: PlaceKind,
) -> Result<Json<ListResponse<Vec<RankedPlace>>>, ApiError> {
    let location = query
        .location
        .unwrap_or_else(|| DEFAULT_PLACES_LOCATION.to_string());
    let limit = query.limit.unwrap_or(DEFAULT_PLACE_LIMIT);

    let (data, provenance) = state.places.search(kind, &location, limit).await?;
    Ok(Json(ListResponse::new(data, provenance, kind.label())))
}

// ─── Directory listings (location-id keyed) ──────────────────────

#[derive(Debug, Deserialize)]
struct DirectoryQuery {
    location_id: Option<String>,
    /// Service-area slug alternative to a raw id ("nags-head", "avon", ...)
    location: Option<String>,
    limit: Option<usize>,
}

impl DirectoryQuery {
    /// Pick the directory id: explicit id wins, then a known slug, then the
    /// region default.
    fn resolve_id(&self) -> String {
        if let Some(id) = &self.location_id {
            return id.clone();
        }
        if let Some(slug) = &self.location {
            if let Some(id) = location_id_for(slug) {
                return id.to_string();
            }
        }
        DEFAULT_LOCATION_ID.to_string()
    }
}

async fn directory_attractions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DirectoryQuery>,
) -> Result<Json<ListResponse<Vec<Place>>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_PLACE_LIMIT);
    let (data, provenance) = state
        .directory
        .attractions(&query.resolve_id(), limit)
        .await?;
    Ok(Json(ListResponse::new(data, provenance, "attraction")))
}

async fn directory_restaurants(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DirectoryQuery>,
) -> Result<Json<ListResponse<Vec<Place>>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_PLACE_LIMIT);
    let (data, provenance) = state
        .directory
        .restaurants(&query.resolve_id(), limit)
        .await?;
    Ok(Json(ListResponse::new(data, provenance, "restaurant")))
}

#[derive(Debug, Deserialize)]
struct ReviewsQuery {
    location_id: String,
    limit: Option<usize>,
}

async fn directory_reviews(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReviewsQuery>,
) -> Result<Json<ListResponse<Vec<Review>>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_REVIEW_LIMIT);
    let (data, provenance) = state
        .directory
        .reviews(&query.location_id, limit)
        .await?;
    Ok(Json(ListResponse::new(data, provenance, "review")))
}

#[derive(Debug, Deserialize)]
struct ReviewsBatchQuery {
    /// Comma-separated directory ids
    location_ids: String,
    limit: Option<usize>,
}

async fn directory_reviews_batch(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReviewsBatchQuery>,
) -> Result<Json<ListResponse<HashMap<String, Vec<Review>>>>, ApiError> {
    let ids: Vec<String> = query
        .location_ids
        .split(',')
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    let limit = query.limit.unwrap_or(DEFAULT_REVIEW_LIMIT);

    let batches = state.directory.reviews_for_places(&ids, limit).await?;

    // The batch note reflects the whole response: advisory only when every
    // per-place batch was served from samples.
    let all_fallback = !batches.is_empty()
        && batches
            .values()
            .all(|(_, provenance)| provenance.is_fallback());
    let provenance = if all_fallback {
        Provenance::Fallback
    } else {
        Provenance::Live
    };

    let data = batches
        .into_iter()
        .map(|(id, (reviews, _))| (id, reviews))
        .collect();

    Ok(Json(ListResponse::new(data, provenance, "review")))
}

#[derive(Debug, Deserialize)]
struct DetailsQuery {
    location_id: String,
}

async fn directory_details(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DetailsQuery>,
) -> Result<Json<ListResponse<LocationDetails>>, ApiError> {
    let (data, provenance) = state
        .directory
        .location_details(&query.location_id)
        .await?;
    Ok(Json(ListResponse::new(data, provenance, "location")))
}

// ─── Weather ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    location: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

async fn weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherSnapshot>, ApiError> {
    let location_query = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => LocationQuery::Coordinates(Coordinates::new(lat, lng)),
        _ => LocationQuery::Address(
            query
                .location
                .unwrap_or_else(|| DEFAULT_WEATHER_LOCATION.to_string()),
        ),
    };

    let snapshot = state.weather.snapshot(location_query).await?;
    Ok(Json(snapshot))
}

// ─── Booking checkout stub ───────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CheckoutRequest {
    property_id: String,
    check_in: String,
    check_out: String,
    guests: u32,
    price_per_night: f64,
}

#[derive(Debug, Serialize)]
struct CheckoutResponse {
    url: String,
    session_id: String,
}

/// Stand-in for the real payment backend; returns a mock session.
async fn create_checkout_session(
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    tracing::info!(
        property_id = %request.property_id,
        check_in = %request.check_in,
        check_out = %request.check_out,
        guests = request.guests,
        price_per_night = request.price_per_night,
        "creating mock checkout session"
    );

    Ok(Json(CheckoutResponse {
        url: "https://checkout.stripe.com/pay/mock-session-id".to_string(),
        session_id: "mock-session-id".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_note_only_on_fallback() {
        assert!(fallback_note(Provenance::Live, "attractions").is_none());
        let note = fallback_note(Provenance::Fallback, "attractions").unwrap();
        assert!(note.contains("sample attractions data"));
    }

    #[test]
    fn test_note_is_omitted_from_live_json() {
        let response = ListResponse::new(vec![1, 2, 3], Provenance::Live, "attractions");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("note").is_none());
    }

    #[test]
    fn test_directory_query_id_resolution() {
        let query = DirectoryQuery {
            location_id: Some("58541".to_string()),
            location: Some("avon".to_string()),
            limit: None,
        };
        assert_eq!(query.resolve_id(), "58541");

        let query = DirectoryQuery {
            location_id: None,
            location: Some("avon".to_string()),
            limit: None,
        };
        assert_eq!(query.resolve_id(), "49223");

        let query = DirectoryQuery {
            location_id: None,
            location: Some("nowhere".to_string()),
            limit: None,
        };
        assert_eq!(query.resolve_id(), DEFAULT_LOCATION_ID);
    }
}
