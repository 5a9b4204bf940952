//! TripAdvisor Content API adapter

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{DirectoryProvider, LocationDetails};
use crate::config::AppConfig;
use crate::error::ProviderError;
use crate::models::place::{valid_price_tier, valid_rating};
use crate::models::review::valid_review_rating;
use crate::models::{Coordinates, Place, Provenance, Review};

const CONTENT_API_URL: &str = "https://api.content.tripadvisor.com/api/v1";
const LISTING_TIMEOUT: Duration = Duration::from_secs(10);

/// TripAdvisor Content API client.
pub struct TripAdvisorClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl TripAdvisorClient {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(LISTING_TIMEOUT)
            .user_agent(concat!("Soundside/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.tripadvisor_api_key.clone(),
            base_url: CONTENT_API_URL.to_string(),
        }
    }

    async fn fetch_listing(
        &self,
        location_id: &str,
        endpoint: &str,
        limit: usize,
    ) -> Result<Vec<RawLocation>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::CredentialMissing)?;

        let url = format!(
            "{}/location/{location_id}/{endpoint}?key={api_key}&language=en&limit={limit}",
            self.base_url
        );

        debug!(location_id, endpoint, "fetching directory listing");
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(response.status().as_u16()));
        }

        let body: ListingResponse<RawLocation> = response.json().await?;
        Ok(body.data.unwrap_or_default())
    }
}

#[async_trait]
impl DirectoryProvider for TripAdvisorClient {
    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn attractions(
        &self,
        location_id: &str,
        limit: usize,
    ) -> Result<Vec<Place>, ProviderError> {
        let raw = self.fetch_listing(location_id, "attractions", limit).await?;
        Ok(raw.into_iter().filter_map(normalize_place).collect())
    }

    async fn restaurants(
        &self,
        location_id: &str,
        limit: usize,
    ) -> Result<Vec<Place>, ProviderError> {
        let raw = self.fetch_listing(location_id, "restaurants", limit).await?;
        Ok(raw.into_iter().filter_map(normalize_place).collect())
    }

    async fn reviews(
        &self,
        location_id: &str,
        limit: usize,
    ) -> Result<Vec<Review>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::CredentialMissing)?;

        let url = format!(
            "{}/location/{location_id}/reviews?key={api_key}&language=en&limit={limit}",
            self.base_url
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(response.status().as_u16()));
        }

        let body: ListingResponse<RawReview> = response.json().await?;
        Ok(body
            .data
            .unwrap_or_default()
            .into_iter()
            .filter_map(normalize_review)
            .collect())
    }

    async fn location_details(
        &self,
        location_id: &str,
    ) -> Result<LocationDetails, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::CredentialMissing)?;

        let url = format!(
            "{}/location/{location_id}/details?key={api_key}&language=en",
            self.base_url
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(response.status().as_u16()));
        }

        let raw: RawLocation = response.json().await?;
        normalize_details(raw).ok_or_else(|| {
            ProviderError::Parse("details response missing location id or name".to_string())
        })
    }
}

fn normalize_place(raw: RawLocation) -> Option<Place> {
    let mut tags = Vec::new();
    if let Some(category) = &raw.category {
        tags.push(category.name.clone());
    }
    for cuisine in raw.cuisine.as_deref().unwrap_or_default() {
        tags.push(cuisine.name.clone());
    }

    let coordinates = parse_coordinates(&raw);
    let image = raw.photo.and_then(|photo| {
        let images = photo.images?;
        images
            .medium
            .or(images.large)
            .or(images.small)
            .map(|image| image.url)
    });

    Some(Place {
        id: raw.location_id?,
        name: raw.name?,
        tags,
        rating: raw.rating.and_then(valid_rating),
        review_count: raw.num_reviews,
        vicinity: raw.address_obj.map(|address| address.flatten()),
        coordinates,
        price_tier: raw.price_level.as_deref().and_then(price_tier_from_symbol),
        open_now: None,
        image,
        provenance: Provenance::Live,
    })
}

fn normalize_details(raw: RawLocation) -> Option<LocationDetails> {
    Some(LocationDetails {
        id: raw.location_id?,
        name: raw.name?,
        description: raw.description,
        web_url: raw.web_url,
        address: raw.address_obj.map(|address| address.flatten()),
        rating: raw.rating.and_then(valid_rating),
        review_count: raw.num_reviews,
        provenance: Provenance::Live,
    })
}

fn normalize_review(raw: RawReview) -> Option<Review> {
    let rating = valid_review_rating(raw.rating?)?;
    let published = parse_published(&raw.published_date?)?;

    Some(Review {
        id: raw.id?,
        title: raw.title.unwrap_or_default(),
        body: raw.text.unwrap_or_default(),
        rating,
        published,
        author: raw
            .user
            .map(|user| user.username)
            .unwrap_or_else(|| "Anonymous".to_string()),
        provenance: Provenance::Live,
    })
}

fn parse_published(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(err) => {
            warn!(value, error = %err, "unparseable review timestamp, dropping record");
            None
        }
    }
}

fn parse_coordinates(raw: &RawLocation) -> Option<Coordinates> {
    let latitude: f64 = raw.latitude.as_deref()?.parse().ok()?;
    let longitude: f64 = raw.longitude.as_deref()?.parse().ok()?;
    let coords = Coordinates::new(latitude, longitude);
    coords.validate().ok()?;
    Some(coords)
}

/// Map a "$".."$$$$" symbol onto the 1..=4 tiers. Range strings like
/// "$$ - $$$" take the lower bound.
fn price_tier_from_symbol(symbol: &str) -> Option<u8> {
    let dollars = symbol
        .trim()
        .chars()
        .take_while(|c| *c == '$')
        .count();
    valid_price_tier(dollars as i64)
}

#[derive(Debug, Deserialize)]
struct ListingResponse<T> {
    data: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    location_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    web_url: Option<String>,
    address_obj: Option<RawAddress>,
    rating: Option<f64>,
    num_reviews: Option<u32>,
    price_level: Option<String>,
    cuisine: Option<Vec<RawNamed>>,
    category: Option<RawNamed>,
    photo: Option<RawPhoto>,
    latitude: Option<String>,
    longitude: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAddress {
    street1: Option<String>,
    city: Option<String>,
    state: Option<String>,
}

impl RawAddress {
    fn flatten(self) -> String {
        [self.street1, self.city, self.state]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawPhoto {
    images: Option<RawImages>,
}

#[derive(Debug, Deserialize)]
struct RawImages {
    small: Option<RawImageUrl>,
    medium: Option<RawImageUrl>,
    large: Option<RawImageUrl>,
}

#[derive(Debug, Deserialize)]
struct RawImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct RawReview {
    id: Option<String>,
    title: Option<String>,
    text: Option<String>,
    rating: Option<i64>,
    published_date: Option<String>,
    user: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_location() -> RawLocation {
        RawLocation {
            location_id: Some("58541".to_string()),
            name: Some("Blue Moon Beach Grill".to_string()),
            description: Some("Casual seafood with local favorites.".to_string()),
            web_url: Some("https://www.tripadvisor.com".to_string()),
            address_obj: Some(RawAddress {
                street1: Some("4104 S Virginia Dare Trail".to_string()),
                city: Some("Nags Head".to_string()),
                state: Some("NC".to_string()),
            }),
            rating: Some(4.7),
            num_reviews: Some(2134),
            price_level: Some("$$".to_string()),
            cuisine: Some(vec![
                RawNamed {
                    name: "Seafood".to_string(),
                },
                RawNamed {
                    name: "American".to_string(),
                },
            ]),
            category: None,
            photo: Some(RawPhoto {
                images: Some(RawImages {
                    small: None,
                    medium: Some(RawImageUrl {
                        url: "/seafood-restaurant.png".to_string(),
                    }),
                    large: None,
                }),
            }),
            latitude: Some("35.9582".to_string()),
            longitude: Some("-75.6201".to_string()),
        }
    }

    #[test]
    fn test_normalize_place_maps_all_fields() {
        let place = normalize_place(raw_location()).unwrap();
        assert_eq!(place.id, "58541");
        assert_eq!(place.tags, vec!["Seafood", "American"]);
        assert_eq!(place.rating, Some(4.7));
        assert_eq!(place.price_tier, Some(2));
        assert_eq!(
            place.vicinity.as_deref(),
            Some("4104 S Virginia Dare Trail, Nags Head, NC")
        );
        assert_eq!(place.image.as_deref(), Some("/seafood-restaurant.png"));
        assert_eq!(
            place.coordinates,
            Some(Coordinates::new(35.9582, -75.6201))
        );
        assert_eq!(place.provenance, Provenance::Live);
    }

    #[test]
    fn test_normalize_place_requires_id() {
        let mut raw = raw_location();
        raw.location_id = None;
        assert!(normalize_place(raw).is_none());
    }

    #[test]
    fn test_price_tier_from_symbol() {
        assert_eq!(price_tier_from_symbol("$"), Some(1));
        assert_eq!(price_tier_from_symbol("$$$$"), Some(4));
        assert_eq!(price_tier_from_symbol("$$ - $$$"), Some(2));
        assert_eq!(price_tier_from_symbol(""), None);
        assert_eq!(price_tier_from_symbol("cheap"), None);
    }

    #[test]
    fn test_normalize_review_drops_bad_rating_or_timestamp() {
        let raw = RawReview {
            id: Some("r1".to_string()),
            title: Some("Great".to_string()),
            text: Some("Loved it".to_string()),
            rating: Some(9),
            published_date: Some("2025-06-01T12:00:00Z".to_string()),
            user: None,
        };
        assert!(normalize_review(raw).is_none());

        let raw = RawReview {
            id: Some("r2".to_string()),
            title: None,
            text: None,
            rating: Some(4),
            published_date: Some("not a date".to_string()),
            user: None,
        };
        assert!(normalize_review(raw).is_none());
    }

    #[test]
    fn test_normalize_review_happy_path() {
        let raw = RawReview {
            id: Some("r3".to_string()),
            title: Some("Worth the visit".to_string()),
            text: Some("Definitely worth checking out.".to_string()),
            rating: Some(4),
            published_date: Some("2025-06-01T12:00:00Z".to_string()),
            user: Some(RawUser {
                username: "TravelingFoodie".to_string(),
            }),
        };
        let review = normalize_review(raw).unwrap();
        assert_eq!(review.rating, 4);
        assert_eq!(review.author, "TravelingFoodie");
        assert_eq!(review.provenance, Provenance::Live);
    }

    #[test]
    fn test_parse_coordinates_rejects_garbage() {
        let mut raw = raw_location();
        raw.latitude = Some("north-ish".to_string());
        assert!(parse_coordinates(&raw).is_none());

        let mut raw = raw_location();
        raw.latitude = Some("95.0".to_string());
        assert!(parse_coordinates(&raw).is_none());
    }
}
