//! Controller-level tests against mock providers
//!
//! These exercise the live/fallback decision logic end to end without any
//! network access: credential-missing short circuits, failure absorption,
//! the quality filter pipeline, geocoding degradation, and the bounded
//! review fan-out.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use soundside::directory::{DirectoryProvider, DirectoryService, LocationDetails, fallback};
use soundside::error::{InputError, ProviderError};
use soundside::geocode::{GeocodeProvider, GeocodeResolver, REGION_CENTER};
use soundside::models::{
    Coordinates, ForecastDay, GeocodeResult, Place, Provenance, Review, WeatherSnapshot,
};
use soundside::places::{self, PlaceKind, PlaceSearchProvider, PlacesService};
use soundside::weather::{LocationQuery, WeatherProvider, WeatherService};

// ─── Mock providers ──────────────────────────────────────────────

enum MockGeocoder {
    Ok(GeocodeResult),
    Unavailable,
}

#[async_trait]
impl GeocodeProvider for MockGeocoder {
    async fn geocode(&self, _address: &str) -> Result<GeocodeResult, ProviderError> {
        match self {
            MockGeocoder::Ok(result) => Ok(result.clone()),
            MockGeocoder::Unavailable => Err(ProviderError::CredentialMissing),
        }
    }
}

enum PlacesOutcome {
    Results(Vec<Place>),
    Status(u16),
    Timeout,
}

struct MockPlaces {
    available: bool,
    outcome: PlacesOutcome,
}

#[async_trait]
impl PlaceSearchProvider for MockPlaces {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn search(
        &self,
        _kind: PlaceKind,
        _center: &Coordinates,
        _radius_m: u32,
    ) -> Result<Vec<Place>, ProviderError> {
        match &self.outcome {
            PlacesOutcome::Results(places) => Ok(places.clone()),
            PlacesOutcome::Status(status) => Err(ProviderError::Http(*status)),
            PlacesOutcome::Timeout => Err(ProviderError::Timeout),
        }
    }
}

enum WeatherOutcome {
    Snapshot(Box<WeatherSnapshot>),
    Failing,
}

struct MockWeather {
    available: bool,
    outcome: WeatherOutcome,
}

#[async_trait]
impl WeatherProvider for MockWeather {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn current_and_forecast(
        &self,
        _coordinates: &Coordinates,
        _label: &str,
    ) -> Result<WeatherSnapshot, ProviderError> {
        match &self.outcome {
            WeatherOutcome::Snapshot(snapshot) => Ok((**snapshot).clone()),
            WeatherOutcome::Failing => Err(ProviderError::Http(503)),
        }
    }
}

struct MockDirectory {
    available: bool,
    reviews_by_id: HashMap<String, Vec<Review>>,
}

#[async_trait]
impl DirectoryProvider for MockDirectory {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn attractions(
        &self,
        _location_id: &str,
        _limit: usize,
    ) -> Result<Vec<Place>, ProviderError> {
        Err(ProviderError::Http(500))
    }

    async fn restaurants(
        &self,
        _location_id: &str,
        _limit: usize,
    ) -> Result<Vec<Place>, ProviderError> {
        Err(ProviderError::Http(500))
    }

    async fn reviews(
        &self,
        location_id: &str,
        limit: usize,
    ) -> Result<Vec<Review>, ProviderError> {
        let mut reviews = self
            .reviews_by_id
            .get(location_id)
            .cloned()
            .ok_or(ProviderError::Empty)?;
        reviews.truncate(limit);
        Ok(reviews)
    }

    async fn location_details(
        &self,
        _location_id: &str,
    ) -> Result<LocationDetails, ProviderError> {
        Err(ProviderError::Http(500))
    }
}

// ─── Fixtures ────────────────────────────────────────────────────

fn live_geocode(lat: f64, lng: f64, address: &str) -> GeocodeResult {
    GeocodeResult {
        coordinates: Coordinates::new(lat, lng),
        formatted_address: address.to_string(),
        provenance: Provenance::Live,
    }
}

fn live_place(id: &str, rating: f64, review_count: u32) -> Place {
    Place {
        id: id.to_string(),
        name: format!("Place {id}"),
        tags: vec!["tourist_attraction".to_string()],
        rating: Some(rating),
        review_count: Some(review_count),
        vicinity: Some("Nags Head, NC".to_string()),
        coordinates: Some(Coordinates::new(35.9582, -75.6201)),
        price_tier: None,
        open_now: Some(true),
        image: Some("/photo.png".to_string()),
        provenance: Provenance::Live,
    }
}

fn live_review(id: &str) -> Review {
    Review {
        id: id.to_string(),
        title: "Great stay".to_string(),
        body: "Would come back.".to_string(),
        rating: 5,
        published: Utc::now(),
        author: "BeachLover123".to_string(),
        provenance: Provenance::Live,
    }
}

fn live_snapshot() -> WeatherSnapshot {
    WeatherSnapshot {
        location: "Nags Head, NC".to_string(),
        coordinates: Coordinates::new(35.9582, -75.6201),
        temperature_f: 75,
        condition: "Clear".to_string(),
        description: "clear sky".to_string(),
        icon: "01d".to_string(),
        humidity_pct: 65,
        wind_mph: 12,
        visibility_mi: 10,
        uv_index: 6,
        provenance: Provenance::Live,
        forecast: (0..5)
            .map(|i| ForecastDay {
                day: if i == 0 { "Today".to_string() } else { format!("Day {i}") },
                date: format!("2025-06-0{}", i + 1),
                high_f: 80,
                low_f: 65,
                condition: "Clear".to_string(),
                icon: "01d".to_string(),
                description: "clear sky".to_string(),
            })
            .collect(),
    }
}

fn places_service(
    geocoder: MockGeocoder,
    provider: MockPlaces,
) -> PlacesService<MockGeocoder, MockPlaces> {
    PlacesService::new(GeocodeResolver::new(geocoder), provider)
}

// ─── Places controller ───────────────────────────────────────────

#[tokio::test]
async fn attractions_fall_back_when_credential_missing() {
    let service = places_service(
        MockGeocoder::Unavailable,
        MockPlaces {
            available: false,
            outcome: PlacesOutcome::Timeout,
        },
    );

    let (records, provenance) = service
        .search(PlaceKind::Attraction, "Outer Banks, NC", 6)
        .await
        .unwrap();

    assert_eq!(provenance, Provenance::Fallback);
    assert!(!records.is_empty());
    assert!(records.len() <= 6);
    for record in &records {
        assert_eq!(record.place.provenance, Provenance::Fallback);
        assert!(record.distance_miles.is_some());
    }
}

#[tokio::test]
async fn attractions_fall_back_on_http_403() {
    let service = places_service(
        MockGeocoder::Ok(live_geocode(35.9582, -75.6201, "Outer Banks, NC")),
        MockPlaces {
            available: true,
            outcome: PlacesOutcome::Status(403),
        },
    );

    let (records, provenance) = service
        .search(PlaceKind::Attraction, "Outer Banks, NC", 6)
        .await
        .unwrap();

    assert_eq!(provenance, Provenance::Fallback);
    assert!(!records.is_empty() && records.len() <= 6);
}

#[tokio::test]
async fn timeout_is_absorbed_like_any_other_failure() {
    let service = places_service(
        MockGeocoder::Ok(live_geocode(35.9582, -75.6201, "Outer Banks, NC")),
        MockPlaces {
            available: true,
            outcome: PlacesOutcome::Timeout,
        },
    );

    let (_, provenance) = service
        .search(PlaceKind::Restaurant, "Outer Banks, NC", 4)
        .await
        .unwrap();
    assert_eq!(provenance, Provenance::Fallback);
}

#[tokio::test]
async fn quality_filter_excludes_low_ratings_and_sorts() {
    let ratings = [4.9, 3.2, 4.7, 4.5, 4.4, 4.3, 4.2, 4.1, 4.0, 3.9, 3.8, 3.7];
    let raw: Vec<Place> = ratings
        .iter()
        .enumerate()
        .map(|(i, rating)| live_place(&format!("p{i}"), *rating, 100))
        .collect();

    let service = places_service(
        MockGeocoder::Ok(live_geocode(35.9582, -75.6201, "Outer Banks, NC")),
        MockPlaces {
            available: true,
            outcome: PlacesOutcome::Results(raw),
        },
    );

    let (records, provenance) = service
        .search(PlaceKind::Attraction, "Outer Banks, NC", 6)
        .await
        .unwrap();

    assert_eq!(provenance, Provenance::Live);
    assert_eq!(records.len(), 6);
    assert!(records.iter().all(|r| r.place.id != "p1"), "3.2 must be excluded");
    let result_ratings: Vec<f64> = records.iter().filter_map(|r| r.place.rating).collect();
    let mut sorted = result_ratings.clone();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert_eq!(result_ratings, sorted);
    assert_eq!(records[0].place.rating, Some(4.9));
}

#[tokio::test]
async fn identical_raw_data_yields_identical_output() {
    let raw: Vec<Place> = (0..8)
        .map(|i| live_place(&format!("p{i}"), 4.5, 100))
        .collect();

    let service = places_service(
        MockGeocoder::Ok(live_geocode(35.9582, -75.6201, "Outer Banks, NC")),
        MockPlaces {
            available: true,
            outcome: PlacesOutcome::Results(raw),
        },
    );

    let (first, _) = service
        .search(PlaceKind::Attraction, "Outer Banks, NC", 5)
        .await
        .unwrap();
    let (second, _) = service
        .search(PlaceKind::Attraction, "Outer Banks, NC", 5)
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn empty_live_results_trigger_fallback() {
    let below_threshold: Vec<Place> = (0..4)
        .map(|i| live_place(&format!("p{i}"), 2.0, 10))
        .collect();

    let service = places_service(
        MockGeocoder::Ok(live_geocode(35.9582, -75.6201, "Outer Banks, NC")),
        MockPlaces {
            available: true,
            outcome: PlacesOutcome::Results(below_threshold),
        },
    );

    let (records, provenance) = service
        .search(PlaceKind::Attraction, "Outer Banks, NC", 6)
        .await
        .unwrap();
    assert_eq!(provenance, Provenance::Fallback);
    assert!(!records.is_empty());
}

#[tokio::test]
async fn invalid_caller_input_is_a_real_error() {
    let service = places_service(
        MockGeocoder::Unavailable,
        MockPlaces {
            available: false,
            outcome: PlacesOutcome::Timeout,
        },
    );

    assert!(matches!(
        service.search(PlaceKind::Attraction, "   ", 6).await,
        Err(InputError::EmptyLocation)
    ));
    assert!(matches!(
        service.search(PlaceKind::Attraction, "Duck, NC", 0).await,
        Err(InputError::InvalidLimit { .. })
    ));
}

// ─── Geocoding resolver ──────────────────────────────────────────

#[tokio::test]
async fn geocoding_known_town_offline_uses_static_table() {
    let resolver = GeocodeResolver::new(MockGeocoder::Unavailable);
    let result = resolver.resolve("Avon, NC").await;

    assert_eq!(result.coordinates, Coordinates::new(35.3518, -75.5032));
    assert_ne!(result.coordinates, REGION_CENTER);
    assert_eq!(result.provenance, Provenance::Fallback);
}

#[tokio::test]
async fn geocoding_unknown_string_offline_uses_region_center() {
    let resolver = GeocodeResolver::new(MockGeocoder::Unavailable);
    let result = resolver.resolve("Atlantis").await;

    assert_eq!(result.coordinates, REGION_CENTER);
    assert_eq!(result.formatted_address, "Atlantis");
    assert_eq!(result.provenance, Provenance::Fallback);
}

#[tokio::test]
async fn geocoding_prefers_live_results() {
    let resolver = GeocodeResolver::new(MockGeocoder::Ok(live_geocode(
        36.1626,
        -75.7463,
        "Duck, NC 27949, USA",
    )));
    let result = resolver.resolve("Duck, NC").await;

    assert_eq!(result.provenance, Provenance::Live);
    assert_eq!(result.formatted_address, "Duck, NC 27949, USA");
}

// ─── Weather controller ──────────────────────────────────────────

#[tokio::test]
async fn weather_always_returns_a_snapshot() {
    let service = WeatherService::new(
        GeocodeResolver::new(MockGeocoder::Unavailable),
        MockWeather {
            available: true,
            outcome: WeatherOutcome::Failing,
        },
    );

    let snapshot = service
        .snapshot(LocationQuery::Address("Avon, NC".to_string()))
        .await
        .unwrap();

    assert_eq!(snapshot.provenance, Provenance::Fallback);
    assert_eq!(snapshot.location, "Avon, NC");
    assert_eq!(snapshot.forecast.len(), 5);
    assert_eq!(snapshot.forecast[0].day, "Today");
    for day in &snapshot.forecast {
        assert!(day.high_f >= day.low_f);
    }
}

#[tokio::test]
async fn weather_live_path_passes_snapshot_through() {
    let service = WeatherService::new(
        GeocodeResolver::new(MockGeocoder::Ok(live_geocode(
            35.9582,
            -75.6201,
            "Nags Head, NC",
        ))),
        MockWeather {
            available: true,
            outcome: WeatherOutcome::Snapshot(Box::new(live_snapshot())),
        },
    );

    let snapshot = service
        .snapshot(LocationQuery::Address("Nags Head, NC".to_string()))
        .await
        .unwrap();
    assert_eq!(snapshot.provenance, Provenance::Live);
    assert_eq!(snapshot.temperature_f, 75);
}

#[tokio::test]
async fn weather_rejects_malformed_coordinates() {
    let service = WeatherService::new(
        GeocodeResolver::new(MockGeocoder::Unavailable),
        MockWeather {
            available: false,
            outcome: WeatherOutcome::Failing,
        },
    );

    let result = service
        .snapshot(LocationQuery::Coordinates(Coordinates::new(91.0, 0.0)))
        .await;
    assert!(matches!(result, Err(InputError::InvalidCoordinate(_))));
}

#[tokio::test]
async fn weather_accepts_raw_coordinates() {
    let service = WeatherService::new(
        GeocodeResolver::new(MockGeocoder::Unavailable),
        MockWeather {
            available: false,
            outcome: WeatherOutcome::Failing,
        },
    );

    let snapshot = service
        .snapshot(LocationQuery::Coordinates(Coordinates::new(
            35.9582, -75.6201,
        )))
        .await
        .unwrap();
    assert_eq!(snapshot.provenance, Provenance::Fallback);
    assert_eq!(snapshot.coordinates, Coordinates::new(35.9582, -75.6201));
}

// ─── Directory controller ────────────────────────────────────────

#[tokio::test]
async fn directory_reviews_fall_back_with_staggered_timestamps() {
    let service = DirectoryService::new(MockDirectory {
        available: false,
        reviews_by_id: HashMap::new(),
    });

    let (reviews, provenance) = service.reviews("49022", 5).await.unwrap();

    assert_eq!(provenance, Provenance::Fallback);
    assert_eq!(reviews.len(), 5);
    let mut stamps: Vec<_> = reviews.iter().map(|r| r.published).collect();
    let before = stamps.len();
    stamps.sort();
    stamps.dedup();
    assert_eq!(stamps.len(), before);
    for review in &reviews {
        assert!((1..=5).contains(&review.rating));
        assert_eq!(review.provenance, Provenance::Fallback);
    }
}

#[tokio::test]
async fn directory_listing_failure_is_absorbed() {
    let service = DirectoryService::new(MockDirectory {
        available: true,
        reviews_by_id: HashMap::new(),
    });

    let (attractions, provenance) = service.attractions("49022", 6).await.unwrap();
    assert_eq!(provenance, Provenance::Fallback);
    assert!(!attractions.is_empty() && attractions.len() <= 6);

    let (restaurants, provenance) = service.restaurants("49022", 3).await.unwrap();
    assert_eq!(provenance, Provenance::Fallback);
    assert_eq!(restaurants.len(), 3);
}

#[tokio::test]
async fn directory_rejects_malformed_location_id() {
    let service = DirectoryService::new(MockDirectory {
        available: false,
        reviews_by_id: HashMap::new(),
    });

    assert!(matches!(
        service.reviews("nags-head", 5).await,
        Err(InputError::InvalidLocationId(_))
    ));
}

#[tokio::test]
async fn review_fanout_reassociates_results_by_id() {
    let mut reviews_by_id = HashMap::new();
    reviews_by_id.insert("101".to_string(), vec![live_review("101-r1")]);
    reviews_by_id.insert("202".to_string(), vec![live_review("202-r1")]);

    let service = DirectoryService::new(MockDirectory {
        available: true,
        reviews_by_id,
    });

    let ids: Vec<String> = ["101", "202", "303"]
        .iter()
        .map(|id| (*id).to_string())
        .collect();
    let batches = service.reviews_for_places(&ids, 5).await.unwrap();

    assert_eq!(batches.len(), 3);
    let (reviews_101, provenance_101) = &batches["101"];
    assert_eq!(reviews_101[0].id, "101-r1");
    assert_eq!(*provenance_101, Provenance::Live);

    let (reviews_202, _) = &batches["202"];
    assert_eq!(reviews_202[0].id, "202-r1");

    // Unknown id degrades to samples rather than dropping out of the map
    let (reviews_303, provenance_303) = &batches["303"];
    assert!(!reviews_303.is_empty());
    assert_eq!(*provenance_303, Provenance::Fallback);
}

// ─── Fallback schema completeness ────────────────────────────────

#[test]
fn fallback_places_are_schema_complete() {
    let catalog: Vec<Place> = soundside::places::fallback::attractions()
        .into_iter()
        .chain(soundside::places::fallback::restaurants())
        .collect();

    assert!(catalog.iter().any(|p| p.rating.is_some()));
    assert!(catalog.iter().any(|p| p.review_count.is_some()));
    assert!(catalog.iter().any(|p| p.vicinity.is_some()));
    assert!(catalog.iter().any(|p| p.coordinates.is_some()));
    assert!(catalog.iter().any(|p| p.price_tier.is_some()));
    assert!(catalog.iter().any(|p| p.open_now.is_some()));
    assert!(catalog.iter().any(|p| p.image.is_some()));
    assert!(catalog.iter().all(|p| !p.tags.is_empty()));
}

#[test]
fn fallback_reviews_are_schema_complete() {
    for review in fallback::reviews("49022", 5) {
        assert!(!review.id.is_empty());
        assert!(!review.title.is_empty());
        assert!(!review.body.is_empty());
        assert!(!review.author.is_empty());
    }
}

#[test]
fn fallback_batches_never_mix_provenance() {
    let attractions = fallback::attractions(6);
    assert!(
        attractions
            .iter()
            .all(|p| p.provenance == Provenance::Fallback)
    );

    for place in places::fallback::restaurants() {
        assert_eq!(place.provenance, Provenance::Fallback);
    }
}
