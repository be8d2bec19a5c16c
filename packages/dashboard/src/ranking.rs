//! Top cities of a region by municipal population.

use std::sync::Arc;

use city_compare_city_models::City;
use city_compare_dataset::Dataset;

/// Number of bars in the ranking panel.
pub const TOP_N: usize = 15;

/// The `n` most populous cities, largest first. Ties keep their input
/// order.
#[must_use]
pub fn top_cities(cities: &[Arc<City>], n: usize) -> Vec<Arc<City>> {
    let mut ranked = cities.to_vec();
    ranked.sort_by(|a, b| b.population.municipal.cmp(&a.population.municipal));
    ranked.truncate(n);
    ranked
}

/// The [`TOP_N`] most populous cities of a region.
#[must_use]
pub fn rank_region(dataset: &Dataset, region_code: &str) -> Vec<Arc<City>> {
    top_cities(&dataset.in_region(region_code), TOP_N)
}
