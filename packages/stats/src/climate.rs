//! Climate bundle.
//!
//! Not hash-based: a fixed reference curve for central France, shifted
//! colder as latitude rises above [`REFERENCE_LATITUDE`] and moderated
//! towards the Atlantic (cooler summers, milder winters).

use city_compare_city_models::{City, Coordinates};
use city_compare_stats_models::{ClimateStats, MonthlyValue};

use crate::{round_half_up, round1};

/// Parallel at which the reference curve applies unchanged.
pub const REFERENCE_LATITUDE: f64 = 46.5;

/// Meridian at which the oceanic moderation term is zero.
pub const REFERENCE_LONGITUDE: f64 = -5.0;

/// Reference point for cities without coordinates; yields the base curve.
pub const REFERENCE_POINT: Coordinates = Coordinates {
    longitude: REFERENCE_LONGITUDE,
    latitude: REFERENCE_LATITUDE,
};

/// Monthly mean temperature at the reference point, in °C.
const BASE_TEMPERATURE: [f64; 12] = [
    4.5, 5.5, 9.0, 12.0, 16.0, 19.5, 22.0, 21.5, 18.0, 13.5, 8.0, 5.0,
];

/// Monthly precipitation at the reference point, in mm.
const BASE_PRECIPITATION: [f64; 12] = [
    55.0, 45.0, 50.0, 60.0, 70.0, 55.0, 40.0, 45.0, 55.0, 70.0, 65.0, 60.0,
];

/// June through September (zero-based).
const fn is_summer(month: usize) -> bool {
    month > 4 && month < 9
}

/// Degrees removed per degree of latitude north of the reference.
fn latitude_factor(latitude: f64) -> f64 {
    (latitude - REFERENCE_LATITUDE) * 1.2
}

fn oceanic_factor(longitude: f64) -> f64 {
    ((longitude - REFERENCE_LONGITUDE) / 15.0).max(0.0) * 0.5
}

/// Generates the climate bundle for `city`.
///
/// Cities without coordinates get the unadjusted reference curve.
#[must_use]
pub fn climate_stats(city: &City) -> ClimateStats {
    climate_at(city.coordinates.unwrap_or(REFERENCE_POINT))
}

/// Generates the climate curves at an arbitrary point.
#[must_use]
pub fn climate_at(point: Coordinates) -> ClimateStats {
    let lat = latitude_factor(point.latitude);
    let ocean = oceanic_factor(point.longitude);

    let temperatures = BASE_TEMPERATURE
        .iter()
        .enumerate()
        .map(|(month, base)| {
            let moderation = if is_summer(month) { -0.5 } else { 0.5 };
            MonthlyValue {
                month,
                value: round1(ocean.mul_add(moderation, *base - lat)),
            }
        })
        .collect();

    let precipitation = BASE_PRECIPITATION
        .iter()
        .enumerate()
        .map(|(month, base)| MonthlyValue {
            month,
            value: round_half_up(lat.mul_add(3.0, *base) - ocean * 5.0),
        })
        .collect();

    ClimateStats {
        temperatures,
        precipitation,
    }
}
