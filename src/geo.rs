//! Great-circle distance between coordinate pairs

use haversine::{Location as HaversineLocation, Units, distance};

use crate::error::InputError;
use crate::models::Coordinates;

/// Haversine distance in statute miles, rounded to one decimal place.
///
/// Invalid coordinates fail fast instead of quietly producing 0 or NaN.
pub fn distance_miles(from: &Coordinates, to: &Coordinates) -> Result<f64, InputError> {
    from.validate()?;
    to.validate()?;

    let miles = distance(
        HaversineLocation {
            latitude: from.latitude,
            longitude: from.longitude,
        },
        HaversineLocation {
            latitude: to.latitude,
            longitude: to.longitude,
        },
        Units::Miles,
    );

    Ok((miles * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAGS_HEAD: Coordinates = Coordinates {
        latitude: 35.9582,
        longitude: -75.6201,
    };
    const BUXTON: Coordinates = Coordinates {
        latitude: 35.2518,
        longitude: -75.5277,
    };

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(distance_miles(&NAGS_HEAD, &NAGS_HEAD).unwrap(), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let there = distance_miles(&NAGS_HEAD, &BUXTON).unwrap();
        let back = distance_miles(&BUXTON, &NAGS_HEAD).unwrap();
        assert_eq!(there, back);
    }

    #[test]
    fn test_distance_magnitude_is_plausible() {
        // Nags Head to Buxton is roughly 49 miles down the banks
        let miles = distance_miles(&NAGS_HEAD, &BUXTON).unwrap();
        assert!((45.0..55.0).contains(&miles), "got {miles}");
    }

    #[test]
    fn test_distance_is_rounded_to_one_decimal() {
        let miles = distance_miles(&NAGS_HEAD, &BUXTON).unwrap();
        assert_eq!(miles, (miles * 10.0).round() / 10.0);
    }

    #[test]
    fn test_invalid_input_fails_fast() {
        let bad = Coordinates::new(f64::NAN, 0.0);
        assert!(matches!(
            distance_miles(&bad, &NAGS_HEAD),
            Err(InputError::InvalidCoordinate(_))
        ));
        let out_of_range = Coordinates::new(0.0, 200.0);
        assert!(distance_miles(&NAGS_HEAD, &out_of_range).is_err());
    }
}
