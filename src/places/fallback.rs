//! Hand-curated sample places served when live data cannot be obtained.
//!
//! These records match the live shape field for field so downstream
//! consumers never branch on provenance except for display.

use crate::models::{Coordinates, Place, Provenance};

fn sample(
    id: &str,
    name: &str,
    tags: &[&str],
    rating: f64,
    review_count: u32,
    vicinity: &str,
    lat: f64,
    lng: f64,
    price_tier: Option<u8>,
    open_now: Option<bool>,
    image: &str,
) -> Place {
    Place {
        id: id.to_string(),
        name: name.to_string(),
        tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
        rating: Some(rating),
        review_count: Some(review_count),
        vicinity: Some(vicinity.to_string()),
        coordinates: Some(Coordinates::new(lat, lng)),
        price_tier,
        open_now,
        image: Some(image.to_string()),
        provenance: Provenance::Fallback,
    }
}

/// Sample attractions across the service area, best first.
#[must_use]
pub fn attractions() -> Vec<Place> {
    vec![
        sample(
            "fallback-1",
            "Jockey's Ridge State Park",
            &["tourist_attraction", "park"],
            4.9,
            890,
            "Nags Head, NC",
            35.9582,
            -75.6201,
            None,
            Some(true),
            "/nags-head-dunes.png",
        ),
        sample(
            "fallback-2",
            "Corolla Wild Horse Fund",
            &["tourist_attraction", "point_of_interest"],
            4.9,
            650,
            "Corolla, NC",
            36.3762,
            -75.8269,
            None,
            None,
            "/corolla-wild-horses-beach.png",
        ),
        sample(
            "fallback-3",
            "Wright Brothers National Memorial",
            &["tourist_attraction", "museum"],
            4.8,
            1250,
            "Kill Devil Hills, NC",
            36.0162,
            -75.6699,
            None,
            Some(true),
            "/kitty-hawk-memorial.png",
        ),
        sample(
            "fallback-4",
            "Cape Hatteras Lighthouse",
            &["tourist_attraction", "point_of_interest"],
            4.7,
            2100,
            "Buxton, NC",
            35.2518,
            -75.5277,
            None,
            None,
            "/cape-hatteras-lighthouse.png",
        ),
        sample(
            "fallback-5",
            "Bodie Island Lighthouse",
            &["tourist_attraction", "point_of_interest"],
            4.7,
            2345,
            "Nags Head, NC",
            35.8185,
            -75.5632,
            None,
            None,
            "/solitary-lighthouse.png",
        ),
        sample(
            "fallback-6",
            "Duck Boardwalk",
            &["tourist_attraction", "point_of_interest"],
            4.6,
            1987,
            "Duck, NC",
            36.1626,
            -75.7463,
            None,
            Some(true),
            "/north-carolina-duck-boardwalk.png",
        ),
    ]
}

/// Sample restaurants across the service area, best first.
#[must_use]
pub fn restaurants() -> Vec<Place> {
    vec![
        sample(
            "restaurant-1",
            "Coastal Cravings",
            &["restaurant", "food"],
            4.8,
            2543,
            "Kitty Hawk, NC",
            36.0626,
            -75.7016,
            Some(3),
            Some(true),
            "/waterfront-seafood.png",
        ),
        sample(
            "restaurant-2",
            "Blue Moon Beach Grill",
            &["restaurant", "food"],
            4.7,
            2134,
            "Nags Head, NC",
            35.9582,
            -75.6201,
            Some(2),
            Some(true),
            "/seafood-restaurant.png",
        ),
        sample(
            "restaurant-3",
            "The Blue Point",
            &["restaurant", "food"],
            4.6,
            890,
            "Duck, NC",
            36.1626,
            -75.7463,
            Some(3),
            None,
            "/waterfront-restaurant.png",
        ),
        sample(
            "restaurant-4",
            "Waves Market & Deli",
            &["restaurant", "food"],
            4.6,
            1243,
            "Waves, NC",
            35.5851,
            -75.4607,
            Some(1),
            Some(true),
            "/deli-sandwich-shop.png",
        ),
        sample(
            "restaurant-5",
            "Owen's Restaurant",
            &["restaurant", "food"],
            4.5,
            1200,
            "Nags Head, NC",
            35.9582,
            -75.6201,
            Some(2),
            None,
            "/nags-head-pier-beach.png",
        ),
        sample(
            "restaurant-6",
            "Awful Arthur's Oyster Bar",
            &["restaurant", "bar"],
            4.4,
            750,
            "Kill Devil Hills, NC",
            36.0162,
            -75.6699,
            Some(2),
            Some(true),
            "/burger-restaurant.png",
        ),
    ]
}
