#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Deterministic statistic generator.
//!
//! Turns a sparse [`City`] record (identifier, region, population,
//! coordinates) into employment, housing, and climate bundles. The numbers
//! are synthetic: the only source of variation is [`hash`] of the commune
//! code, so the same city always yields bit-identical bundles regardless
//! of call order, process, or wall-clock time.

pub mod climate;
pub mod employment;
pub mod housing;
pub mod regions;

use city_compare_city_models::City;
use city_compare_stats_models::CityStats;

pub use climate::climate_stats;
pub use employment::employment_stats;
pub use housing::housing_stats;

/// Polynomial rolling hash over the UTF-16 code units of `identifier`
/// (`h = h * 31 + unit`, wrapping at 32 bits), returned as an absolute
/// value.
#[must_use]
pub fn hash(identifier: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in identifier.encode_utf16() {
        h = (h << 5).wrapping_sub(h).wrapping_add(i32::from(unit));
    }
    h.unsigned_abs()
}

/// Generates every bundle for `city`.
#[must_use]
pub fn generate(city: &City) -> CityStats {
    CityStats {
        city_id: city.id.clone(),
        employment: employment_stats(city),
        housing: housing_stats(city),
        climate: climate_stats(city),
    }
}

/// Rounds half up to the nearest integer.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds half up to one decimal.
pub(crate) fn round1(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// `h mod m` as a float, for mixing into the generated figures.
pub(crate) fn hmod(h: u32, m: u32) -> f64 {
    f64::from(h % m)
}

/// Rounds a non-negative figure to a whole count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn whole(value: f64) -> u64 {
    round_half_up(value.max(0.0)) as u64
}

#[allow(clippy::cast_precision_loss)]
pub(crate) const fn as_f64(value: u64) -> f64 {
    value as f64
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_known_values() {
        assert_eq!(hash(""), 0);
        assert_eq!(hash("a"), 97);
        assert_eq!(hash("75056"), 52_420_403);
        assert_eq!(hash("69123"), 51_616_911);
    }

    #[test]
    fn hash_is_absolute_for_overflowing_inputs() {
        // Wraps past i32::MAX several times and ends negative.
        assert_eq!(
            hash("Saint-Remy-en-Bouzemont-Saint-Genest-et-Isson"),
            1_998_127_873
        );
    }

    #[test]
    fn generate_is_pure() {
        for city in test_fixtures::sample() {
            let a = generate(&city);
            let b = generate(&city);
            assert_eq!(a, b, "bundles differ for {}", city.id);
            assert_eq!(
                a.employment.unemployment_rate.to_bits(),
                b.employment.unemployment_rate.to_bits()
            );
        }
    }

    #[test]
    fn generate_does_not_depend_on_call_order() {
        let cities = test_fixtures::sample();
        let forward: Vec<_> = cities.iter().map(generate).collect();
        let mut backward: Vec<_> = cities.iter().rev().map(generate).collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn rounding_is_half_up() {
        assert!((round1(2.25) - 2.3).abs() < 1e-9);
        assert!((round_half_up(-0.5) - 0.0).abs() < f64::EPSILON);
        assert_eq!(whole(986_116.5), 986_117);
    }
}
