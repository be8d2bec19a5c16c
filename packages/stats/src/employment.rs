//! Employment bundle.

use city_compare_city_models::City;
use city_compare_stats_models::{BreakdownGroup, EmploymentStats, Sector, Share};

use crate::{as_f64, hash, hmod, regions, round1, whole};

/// Lower clamp of the unemployment rate.
pub const MIN_UNEMPLOYMENT: f64 = 4.0;
/// Upper clamp of the unemployment rate.
pub const MAX_UNEMPLOYMENT: f64 = 15.0;

/// Cities above this municipal population get the "urban" agriculture
/// range.
const URBAN_THRESHOLD: u64 = 100_000;

/// Generates the employment bundle for `city`.
///
/// The Services share is `100 - (agriculture + industry + construction +
/// commerce)` and is reported as computed, without clamping.
#[must_use]
pub fn employment_stats(city: &City) -> EmploymentStats {
    let h = hash(&city.id);
    let municipal = city.population.municipal;
    let pop = as_f64(municipal);

    let base = regions::base_unemployment(&city.region_code);
    let variation = (hmod(h, 40) - 20.0) / 10.0;
    let unemployment_rate = round1(base + variation).clamp(MIN_UNEMPLOYMENT, MAX_UNEMPLOYMENT);

    let job_count = whole(pop * (0.38 + hmod(h, 15) / 100.0));
    let activity_rate = round1(66.0 + hmod(h, 14));

    let agriculture = if municipal > URBAN_THRESHOLD {
        hmod(h, 8).mul_add(0.1, 0.3)
    } else {
        hmod(h, 10).mul_add(0.4, 1.5)
    };
    let industry = 8.0 + hmod(h, 12);
    let construction = 5.0 + hmod(h, 5);
    let commerce = 12.0 + hmod(h, 7);
    let services = 100.0 - agriculture - industry - construction - commerce;

    if services < 0.0 {
        log::warn!(
            "Services share for city {} is negative ({services:.1}); reporting as computed",
            city.id
        );
    }

    let median_income = whole(1750.0 + pop / 800.0 + hmod(h, 650));

    EmploymentStats {
        unemployment_rate,
        job_count,
        activity_rate,
        median_income,
        sectors: BreakdownGroup {
            title: "Sectors".to_string(),
            shares: vec![
                Share::new(Sector::Agriculture, round1(agriculture)),
                Share::new(Sector::Industry, round1(industry)),
                Share::new(Sector::Construction, round1(construction)),
                Share::new(Sector::Commerce, round1(commerce)),
                Share::new(Sector::Services, round1(services)),
            ],
        },
    }
}
