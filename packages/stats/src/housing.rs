//! Housing bundle.

use city_compare_city_models::City;
use city_compare_stats_models::{
    BreakdownGroup, DwellingType, HousingStats, Occupancy, Share, Tenure,
};

use crate::{as_f64, hash, hmod, round1, whole};

/// Cities above this municipal population use the "large city" tenure and
/// dwelling-type ranges.
const LARGE_CITY_THRESHOLD: u64 = 200_000;

/// Price per m² tier for a municipal population: `(base, spread)`. The
/// final price is `base + h mod spread`.
#[must_use]
pub const fn price_tier(municipal: u64) -> (u32, u32) {
    if municipal > 500_000 {
        (4500, 4000)
    } else if municipal > 100_000 {
        (2800, 2500)
    } else if municipal > 50_000 {
        (1800, 1800)
    } else {
        (1200, 1500)
    }
}

/// Generates the housing bundle for `city`.
#[must_use]
pub fn housing_stats(city: &City) -> HousingStats {
    let h = hash(&city.id);
    let municipal = city.population.municipal;
    let pop = as_f64(municipal);
    let large = municipal > LARGE_CITY_THRESHOLD;

    let dwelling_count = whole(pop * (0.46 + hmod(h, 12) / 100.0));

    let primary = 80.0 + hmod(h, 14);
    let secondary = 2.0 + hmod(h, 6);
    let vacant = 100.0 - primary - secondary;

    let owners = if large {
        30.0 + hmod(h, 15)
    } else {
        45.0 + hmod(h, 20)
    };
    let renters = 100.0 - owners;

    let houses = if large {
        12.0 + hmod(h, 18)
    } else {
        35.0 + hmod(h, 35)
    };
    let apartments = 100.0 - houses;

    let (price_base, price_spread) = price_tier(municipal);
    let price_per_m2 = u64::from(price_base + h % price_spread);

    HousingStats {
        dwelling_count,
        price_per_m2,
        mean_surface: u64::from(55 + h % 45),
        social_housing_pct: round1(8.0 + hmod(h, 22)),
        occupancy: BreakdownGroup {
            title: "Occupancy".to_string(),
            shares: vec![
                Share::new(Occupancy::PrimaryResidence, round1(primary)),
                Share::new(Occupancy::SecondaryResidence, round1(secondary)),
                Share::new(Occupancy::Vacant, round1(vacant)),
            ],
        },
        tenure: BreakdownGroup {
            title: "Tenure".to_string(),
            shares: vec![
                Share::new(Tenure::Owner, round1(owners)),
                Share::new(Tenure::Renter, round1(renters)),
            ],
        },
        dwelling_type: BreakdownGroup {
            title: "Dwelling type".to_string(),
            shares: vec![
                Share::new(DwellingType::House, round1(houses)),
                Share::new(DwellingType::Apartment, round1(apartments)),
            ],
        },
    }
}
