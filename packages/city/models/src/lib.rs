#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City, population, and region types.
//!
//! A [`City`] is loaded once from the census dataset and never mutated
//! afterwards, except for the one-time attachment of its [`Coordinates`]
//! during enrichment. Every other crate in the workspace borrows these
//! records (usually behind an `Arc`) rather than copying them around.

use serde::{Deserialize, Serialize};

/// Minimum municipal population for a city to be kept after loading.
pub const POPULATION_THRESHOLD: u64 = 20_000;

/// Maximum number of cities that can be selected at once.
pub const MAX_SELECTION: usize = 2;

/// The three census population figures for a single commune.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Population {
    /// Residents counted in the commune itself.
    pub municipal: u64,
    /// Residents attached to the commune but counted elsewhere
    /// (students, boarding schools, etc.).
    pub counted_elsewhere: u64,
    /// Municipal plus counted-elsewhere.
    pub total: u64,
}

impl Population {
    /// Returns the value of a single [`PopulationMetric`].
    #[must_use]
    pub const fn metric(&self, metric: PopulationMetric) -> u64 {
        match metric {
            PopulationMetric::Municipal => self.municipal,
            PopulationMetric::CountedElsewhere => self.counted_elsewhere,
            PopulationMetric::Total => self.total,
        }
    }
}

/// Selector for one of the [`Population`] figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulationMetric {
    /// Municipal population.
    Municipal,
    /// Population counted elsewhere.
    CountedElsewhere,
    /// Total population.
    Total,
}

impl PopulationMetric {
    /// All metrics, in display order.
    pub const ALL: [Self; 3] = [Self::Municipal, Self::CountedElsewhere, Self::Total];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Municipal => "Municipal population",
            Self::CountedElsewhere => "Counted elsewhere",
            Self::Total => "Total population",
        }
    }
}

/// WGS84 point attached to a city from the coordinate registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

/// A commune from the census dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Commune code (e.g. "75056"). Stable identity for every keyed view.
    pub id: String,
    /// Commune name.
    pub name: String,
    /// Region code (e.g. "11").
    pub region_code: String,
    /// Region display name, as it appears in the dataset.
    pub region_name: String,
    /// Census population figures.
    pub population: Population,
    /// Centre of the commune, if the coordinate registry knows it.
    pub coordinates: Option<Coordinates>,
}

impl City {
    /// Returns a copy of this city with coordinates attached.
    #[must_use]
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Whether the city can be placed on the map (and therefore selected
    /// and sent to the weather provider).
    #[must_use]
    pub const fn is_mappable(&self) -> bool {
        self.coordinates.is_some()
    }
}

/// A region present in the filtered dataset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Region code; regions sort by this.
    pub code: String,
    /// Display name.
    pub name: String,
}

/// Position of a city in the selection. Slot assignment drives the color
/// used for that city in every panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// The first selected city.
    First,
    /// The second selected city.
    Second,
}

impl Slot {
    /// Both slots, in order.
    pub const ALL: [Self; MAX_SELECTION] = [Self::First, Self::Second];

    /// Zero-based index of the slot.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> City {
        City {
            id: "75056".to_string(),
            name: "Paris".to_string(),
            region_code: "11".to_string(),
            region_name: "Ile-de-France".to_string(),
            population: Population {
                municipal: 2_145_906,
                counted_elsewhere: 20_000,
                total: 2_165_906,
            },
            coordinates: None,
        }
    }

    #[test]
    fn coordinates_make_city_mappable() {
        let city = paris();
        assert!(!city.is_mappable());

        let city = city.with_coordinates(Coordinates {
            longitude: 2.347,
            latitude: 48.859,
        });
        assert!(city.is_mappable());
        assert_eq!(city.id, "75056");
    }

    #[test]
    fn population_metric_lookup() {
        let pop = paris().population;
        assert_eq!(pop.metric(PopulationMetric::Municipal), 2_145_906);
        assert_eq!(pop.metric(PopulationMetric::CountedElsewhere), 20_000);
        assert_eq!(pop.metric(PopulationMetric::Total), 2_165_906);
    }

    #[test]
    fn regions_sort_by_code() {
        let mut regions = vec![
            Region {
                code: "84".to_string(),
                name: "Auvergne-Rhone-Alpes".to_string(),
            },
            Region {
                code: "11".to_string(),
                name: "Ile-de-France".to_string(),
            },
        ];
        regions.sort();
        assert_eq!(regions[0].code, "11");
    }

    #[test]
    fn slot_indices() {
        assert_eq!(Slot::First.index(), 0);
        assert_eq!(Slot::Second.index(), 1);
    }
}
