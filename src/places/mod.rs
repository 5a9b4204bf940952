//! Nearby places aggregation
//!
//! The places controller turns a free-text location into a ranked list of
//! attractions or restaurants. It owns the live/fallback decision: provider
//! unavailable, any adapter failure, or an empty post-filter result all
//! degrade to the bundled sample catalog, so the call never fails for
//! provider-class reasons.

pub mod fallback;
pub mod google;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::{InputError, ProviderError};
use crate::geo;
use crate::geocode::{GeocodeProvider, GeocodeResolver};
use crate::models::{Coordinates, GeocodeResult, Place, Provenance, RankedPlace};

pub use google::GooglePlacesClient;

/// Default search radius around the resolved origin, in meters.
pub const DEFAULT_SEARCH_RADIUS_M: u32 = 50_000;

/// Largest limit a caller may request in one call.
pub const MAX_LIMIT: usize = 50;

/// The two place domains served by this controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceKind {
    Attraction,
    Restaurant,
}

impl PlaceKind {
    /// Provider category types searched for this kind.
    #[must_use]
    pub fn category_types(self) -> &'static [&'static str] {
        match self {
            PlaceKind::Attraction => &[
                "tourist_attraction",
                "museum",
                "park",
                "amusement_park",
                "aquarium",
            ],
            PlaceKind::Restaurant => &["restaurant", "meal_takeaway", "bar", "cafe"],
        }
    }

    /// Minimum rating a live result needs to survive the quality filter.
    /// Attractions are held to a higher bar than restaurants.
    #[must_use]
    pub fn min_rating(self) -> f64 {
        match self {
            PlaceKind::Attraction => 3.5,
            PlaceKind::Restaurant => 3.0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PlaceKind::Attraction => "attractions",
            PlaceKind::Restaurant => "restaurants",
        }
    }
}

/// A live nearby-search backend.
#[async_trait]
pub trait PlaceSearchProvider: Send + Sync {
    /// Whether the provider credential was present at startup.
    fn is_available(&self) -> bool;

    async fn search(
        &self,
        kind: PlaceKind,
        center: &Coordinates,
        radius_m: u32,
    ) -> Result<Vec<Place>, ProviderError>;
}

/// Aggregation controller for the places domain.
pub struct PlacesService<G, P> {
    resolver: GeocodeResolver<G>,
    provider: P,
    radius_m: u32,
}

impl<G: GeocodeProvider, P: PlaceSearchProvider> PlacesService<G, P> {
    pub fn new(resolver: GeocodeResolver<G>, provider: P) -> Self {
        Self {
            resolver,
            provider,
            radius_m: DEFAULT_SEARCH_RADIUS_M,
        }
    }

    /// Ranked places near a free-text location.
    ///
    /// Only caller mistakes surface as errors; every provider failure is
    /// absorbed into the fallback path. All records in the returned batch
    /// share the returned provenance.
    pub async fn search(
        &self,
        kind: PlaceKind,
        location: &str,
        limit: usize,
    ) -> Result<(Vec<RankedPlace>, Provenance), InputError> {
        if location.trim().is_empty() {
            return Err(InputError::EmptyLocation);
        }
        validate_limit(limit)?;

        let origin = self.resolver.resolve(location).await;

        if !self.provider.is_available() {
            info!(domain = kind.label(), "provider unavailable, serving sample catalog");
            return Ok(self.fallback_batch(kind, &origin, limit));
        }

        match self
            .provider
            .search(kind, &origin.coordinates, self.radius_m)
            .await
        {
            Ok(raw) => {
                let filtered = quality_filter(raw, kind.min_rating(), limit);
                if filtered.is_empty() {
                    // An empty live list is indistinguishable from "nothing
                    // worth showing"; the product always shows something.
                    warn!(
                        domain = kind.label(),
                        "no live results survived the quality filter, serving sample catalog"
                    );
                    Ok(self.fallback_batch(kind, &origin, limit))
                } else {
                    Ok((annotate_distances(filtered, &origin), Provenance::Live))
                }
            }
            Err(err) => {
                warn!(
                    domain = kind.label(),
                    error = %err,
                    "provider call failed, serving sample catalog"
                );
                Ok(self.fallback_batch(kind, &origin, limit))
            }
        }
    }

    fn fallback_batch(
        &self,
        kind: PlaceKind,
        origin: &GeocodeResult,
        limit: usize,
    ) -> (Vec<RankedPlace>, Provenance) {
        let catalog = match kind {
            PlaceKind::Attraction => fallback::attractions(),
            PlaceKind::Restaurant => fallback::restaurants(),
        };
        let mut batch = catalog;
        batch.truncate(limit);
        (annotate_distances(batch, origin), Provenance::Fallback)
    }
}

/// Validate a caller-requested result limit.
pub fn validate_limit(limit: usize) -> Result<(), InputError> {
    if limit == 0 || limit > MAX_LIMIT {
        return Err(InputError::InvalidLimit {
            got: limit,
            max: MAX_LIMIT,
        });
    }
    Ok(())
}

/// Dedup, threshold, rank, and truncate raw provider results.
///
/// A place appearing under multiple category searches counts once (first
/// occurrence wins). Records with no rating or one below the threshold are
/// dropped. Ordering is rating descending with review count breaking ties;
/// remaining ties keep their original order so identical input always
/// produces identical output.
pub fn quality_filter(places: Vec<Place>, min_rating: f64, limit: usize) -> Vec<Place> {
    let mut seen = std::collections::HashSet::new();
    let mut kept: Vec<Place> = places
        .into_iter()
        .filter(|place| seen.insert(place.id.clone()))
        .filter(|place| place.rating.is_some_and(|rating| rating >= min_rating))
        .collect();

    kept.sort_by(|a, b| {
        let by_rating = b
            .rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal);
        by_rating.then_with(|| b.review_count.cmp(&a.review_count))
    });
    kept.truncate(limit);
    kept
}

/// Attach the per-request distance annotation against the resolved origin.
fn annotate_distances(places: Vec<Place>, origin: &GeocodeResult) -> Vec<RankedPlace> {
    places
        .into_iter()
        .map(|place| {
            let distance_miles = place
                .coordinates
                .as_ref()
                .and_then(|coords| geo::distance_miles(&origin.coordinates, coords).ok());
            RankedPlace {
                place,
                distance_miles,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, rating: Option<f64>, review_count: Option<u32>) -> Place {
        Place {
            id: id.to_string(),
            name: format!("Place {id}"),
            tags: vec!["tourist_attraction".to_string()],
            rating,
            review_count,
            vicinity: None,
            coordinates: Some(Coordinates::new(35.9582, -75.6201)),
            price_tier: None,
            open_now: None,
            image: None,
            provenance: Provenance::Live,
        }
    }

    #[test]
    fn test_quality_filter_dedupes_by_id() {
        let raw = vec![
            place("a", Some(4.5), Some(100)),
            place("a", Some(4.5), Some(100)),
            place("b", Some(4.0), Some(50)),
        ];
        let kept = quality_filter(raw, 3.5, 10);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_quality_filter_drops_below_threshold_and_unrated() {
        let raw = vec![
            place("a", Some(4.9), Some(10)),
            place("b", Some(3.2), Some(9000)),
            place("c", None, Some(50)),
        ];
        let kept = quality_filter(raw, 3.5, 10);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "a");
    }

    #[test]
    fn test_quality_filter_sorts_by_rating_then_review_count() {
        let raw = vec![
            place("low", Some(3.6), Some(10)),
            place("tied-few", Some(4.5), Some(10)),
            place("tied-many", Some(4.5), Some(500)),
            place("top", Some(4.9), Some(2)),
        ];
        let kept = quality_filter(raw, 3.5, 10);
        let ids: Vec<&str> = kept.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "tied-many", "tied-few", "low"]);
    }

    #[test]
    fn test_quality_filter_full_ties_keep_original_order() {
        let raw = vec![
            place("first", Some(4.5), Some(100)),
            place("second", Some(4.5), Some(100)),
            place("third", Some(4.5), Some(100)),
        ];
        let kept = quality_filter(raw, 3.5, 10);
        let ids: Vec<&str> = kept.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_quality_filter_truncates_to_limit() {
        let raw = (0..20)
            .map(|i| place(&format!("p{i}"), Some(4.0), Some(i)))
            .collect();
        let kept = quality_filter(raw, 3.5, 6);
        assert_eq!(kept.len(), 6);
    }

    #[test]
    fn test_validate_limit_bounds() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(MAX_LIMIT).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(MAX_LIMIT + 1).is_err());
    }
}
