//! Sample directory data served when the live directory cannot be reached.

use chrono::{Duration, Utc};

use super::LocationDetails;
use crate::models::{Coordinates, Place, Provenance, Review};

struct SamplePlace {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    cuisine: &'static [&'static str],
    rating: f64,
    review_count: u32,
    vicinity: &'static str,
    lat: f64,
    lng: f64,
    price_tier: Option<u8>,
    image: &'static str,
}

const SAMPLE_ATTRACTIONS: &[SamplePlace] = &[
    SamplePlace {
        id: "sample-attraction-1",
        name: "Cape Hatteras Lighthouse",
        category: "Historic Site",
        cuisine: &[],
        rating: 4.8,
        review_count: 3245,
        vicinity: "46379 Lighthouse Rd, Buxton, NC",
        lat: 35.2518,
        lng: -75.5277,
        price_tier: None,
        image: "/cape-hatteras-lighthouse.png",
    },
    SamplePlace {
        id: "sample-attraction-2",
        name: "Wright Brothers National Memorial",
        category: "Historic Site",
        cuisine: &[],
        rating: 4.7,
        review_count: 4123,
        vicinity: "1000 N Croatan Hwy, Kill Devil Hills, NC",
        lat: 36.0162,
        lng: -75.6699,
        price_tier: None,
        image: "/kitty-hawk-memorial.png",
    },
    SamplePlace {
        id: "sample-attraction-3",
        name: "Corolla Wild Horse Tours",
        category: "Nature & Wildlife Tour",
        cuisine: &[],
        rating: 4.9,
        review_count: 2876,
        vicinity: "1210 Ocean Trail, Corolla, NC",
        lat: 36.3762,
        lng: -75.8269,
        price_tier: None,
        image: "/corolla-wild-horses-beach.png",
    },
    SamplePlace {
        id: "sample-attraction-4",
        name: "Jockey's Ridge State Park",
        category: "State Park",
        cuisine: &[],
        rating: 4.8,
        review_count: 3567,
        vicinity: "300 W Carolista Dr, Nags Head, NC",
        lat: 35.9582,
        lng: -75.6201,
        price_tier: None,
        image: "/nags-head-pier-beach.png",
    },
    SamplePlace {
        id: "sample-attraction-5",
        name: "Duck Boardwalk",
        category: "Scenic Walking Area",
        cuisine: &[],
        rating: 4.6,
        review_count: 1987,
        vicinity: "1200 Duck Rd, Duck, NC",
        lat: 36.1626,
        lng: -75.7463,
        price_tier: None,
        image: "/north-carolina-duck-boardwalk.png",
    },
    SamplePlace {
        id: "sample-attraction-6",
        name: "Bodie Island Lighthouse",
        category: "Historic Site",
        cuisine: &[],
        rating: 4.7,
        review_count: 2345,
        vicinity: "8210 Bodie Island Lighthouse Rd, Nags Head, NC",
        lat: 35.8185,
        lng: -75.5632,
        price_tier: None,
        image: "/solitary-lighthouse.png",
    },
];

const SAMPLE_RESTAURANTS: &[SamplePlace] = &[
    SamplePlace {
        id: "sample-restaurant-1",
        name: "Blue Moon Beach Grill",
        category: "Restaurant",
        cuisine: &["Seafood", "American"],
        rating: 4.7,
        review_count: 2134,
        vicinity: "4104 S Virginia Dare Trail, Nags Head, NC",
        lat: 35.9582,
        lng: -75.6201,
        price_tier: Some(2),
        image: "/seafood-restaurant.png",
    },
    SamplePlace {
        id: "sample-restaurant-2",
        name: "Duck Duck Burgers",
        category: "Restaurant",
        cuisine: &["American", "Bar"],
        rating: 4.6,
        review_count: 1876,
        vicinity: "1187 Duck Rd, Duck, NC",
        lat: 36.1626,
        lng: -75.7463,
        price_tier: Some(2),
        image: "/burger-restaurant.png",
    },
    SamplePlace {
        id: "sample-restaurant-3",
        name: "Coastal Cravings",
        category: "Restaurant",
        cuisine: &["Seafood", "American"],
        rating: 4.8,
        review_count: 2543,
        vicinity: "3701 N Croatan Hwy, Kitty Hawk, NC",
        lat: 36.0626,
        lng: -75.7016,
        price_tier: Some(3),
        image: "/waterfront-seafood.png",
    },
    SamplePlace {
        id: "sample-restaurant-4",
        name: "Hatteras Sol Waterside Grill",
        category: "Restaurant",
        cuisine: &["Seafood", "American"],
        rating: 4.7,
        review_count: 1987,
        vicinity: "57878 NC-12, Hatteras, NC",
        lat: 35.2087,
        lng: -75.6877,
        price_tier: Some(3),
        image: "/waterfront-restaurant.png",
    },
    SamplePlace {
        id: "sample-restaurant-5",
        name: "Corolla Cantina",
        category: "Restaurant",
        cuisine: &["Mexican", "Southwestern"],
        rating: 4.5,
        review_count: 1654,
        vicinity: "1129 Corolla Village Rd, Corolla, NC",
        lat: 36.3762,
        lng: -75.8269,
        price_tier: Some(2),
        image: "/vibrant-mexican-restaurant.png",
    },
    SamplePlace {
        id: "sample-restaurant-6",
        name: "Waves Market & Deli",
        category: "Restaurant",
        cuisine: &["Deli", "American"],
        rating: 4.6,
        review_count: 1243,
        vicinity: "25210 NC-12, Waves, NC",
        lat: 35.5851,
        lng: -75.4607,
        price_tier: Some(1),
        image: "/deli-sandwich-shop.png",
    },
];

/// Staggered review templates: day offset, rating, title, body, author.
/// Distinct offsets keep a fallback batch visually plausible.
const SAMPLE_REVIEWS: &[(i64, u8, &str, &str, &str)] = &[
    (
        7,
        5,
        "Amazing experience!",
        "We had a wonderful time here. The location is beautiful and the service was \
         excellent. Would definitely recommend to anyone visiting the Outer Banks.",
        "BeachLover123",
    ),
    (
        14,
        4,
        "Great place, a few minor issues",
        "Overall we enjoyed our visit. The views were spectacular and most of the staff \
         were friendly. There were a couple of small issues with cleanliness but nothing major.",
        "CoastalExplorer",
    ),
    (
        30,
        4,
        "Worth the visit",
        "Definitely worth checking out if you're in the area. Not the best I've seen but \
         still very good. The prices were reasonable and the atmosphere was nice.",
        "TravelingFoodie",
    ),
    (
        45,
        5,
        "Exceeded expectations",
        "I wasn't expecting much but was pleasantly surprised. The location is stunning \
         and everything was well maintained. Will definitely be back next time I'm in OBX.",
        "SunsetChaser",
    ),
    (
        60,
        3,
        "Decent but overpriced",
        "The experience was good but I felt it was a bit overpriced for what you get. The \
         views are nice though and the staff were helpful when we had questions.",
        "BudgetTraveler",
    ),
];

fn build_place(sample: &SamplePlace) -> Place {
    let mut tags = vec![sample.category.to_string()];
    tags.extend(sample.cuisine.iter().map(|name| (*name).to_string()));

    Place {
        id: sample.id.to_string(),
        name: sample.name.to_string(),
        tags,
        rating: Some(sample.rating),
        review_count: Some(sample.review_count),
        vicinity: Some(sample.vicinity.to_string()),
        coordinates: Some(Coordinates::new(sample.lat, sample.lng)),
        price_tier: sample.price_tier,
        open_now: None,
        image: Some(sample.image.to_string()),
        provenance: Provenance::Fallback,
    }
}

#[must_use]
pub fn attractions(limit: usize) -> Vec<Place> {
    SAMPLE_ATTRACTIONS
        .iter()
        .take(limit)
        .map(build_place)
        .collect()
}

#[must_use]
pub fn restaurants(limit: usize) -> Vec<Place> {
    SAMPLE_RESTAURANTS
        .iter()
        .take(limit)
        .map(build_place)
        .collect()
}

/// Sample reviews for one location, timestamps staggered backwards from now.
#[must_use]
pub fn reviews(location_id: &str, limit: usize) -> Vec<Review> {
    let now = Utc::now();
    SAMPLE_REVIEWS
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, (days_ago, rating, title, body, author))| Review {
            id: format!("{location_id}-review-{}", index + 1),
            title: (*title).to_string(),
            body: (*body).to_string(),
            rating: *rating,
            published: now - Duration::days(*days_ago),
            author: (*author).to_string(),
            provenance: Provenance::Fallback,
        })
        .collect()
}

/// Sample details: the matching sample place when the id is known, else a
/// generic region record.
#[must_use]
pub fn location_details(location_id: &str) -> LocationDetails {
    let known = SAMPLE_ATTRACTIONS
        .iter()
        .chain(SAMPLE_RESTAURANTS.iter())
        .find(|sample| sample.id == location_id);

    match known {
        Some(sample) => LocationDetails {
            id: sample.id.to_string(),
            name: sample.name.to_string(),
            description: None,
            web_url: Some("https://www.tripadvisor.com".to_string()),
            address: Some(sample.vicinity.to_string()),
            rating: Some(sample.rating),
            review_count: Some(sample.review_count),
            provenance: Provenance::Fallback,
        },
        None => LocationDetails {
            id: location_id.to_string(),
            name: "Outer Banks".to_string(),
            description: Some(
                "Barrier islands off the North Carolina coast known for wide beaches, \
                 wild horses, and historic lighthouses."
                    .to_string(),
            ),
            web_url: Some("https://www.tripadvisor.com".to_string()),
            address: Some("Outer Banks, NC".to_string()),
            rating: None,
            review_count: None,
            provenance: Provenance::Fallback,
        },
    }
}
