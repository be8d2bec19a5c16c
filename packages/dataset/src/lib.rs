#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Census dataset loading and lookup.
//!
//! The dashboard starts by fetching three resources in parallel (see
//! [`load::load_all`]):
//!
//! 1. **Boundary geometry**: a `GeoJSON` feature collection handed to the
//!    map renderer untouched.
//! 2. **Census table**: a `;`-delimited file with one row per commune
//!    ([`parse`]).
//! 3. **Coordinate registry**: commune code to centre point
//!    ([`coordinates`]).
//!
//! Any failure is terminal. Once all three are in, [`Dataset::build`]
//! filters communes by population, attaches coordinates, and derives the
//! sorted region list. [`search::SearchIndex`] answers the search box.

pub mod config;
pub mod coordinates;
pub mod load;
pub mod parse;
pub mod search;

use std::collections::BTreeMap;
use std::sync::Arc;

use city_compare_city_models::{City, POPULATION_THRESHOLD, Region};

use crate::coordinates::CoordinateRegistry;

/// Errors that can occur while reading or parsing a data source.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON parse error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// I/O error (local file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required column is absent from the header row.
    #[error("Missing column: {name}")]
    MissingColumn {
        /// Name (or position) of the missing column.
        name: String,
    },

    /// The resource parsed but has the wrong shape.
    #[error("Unexpected data: {message}")]
    Shape {
        /// Description of what went wrong.
        message: String,
    },
}

/// The filtered, enriched city collection.
///
/// This is the explicit context every stat and view function receives;
/// nothing in the workspace captures it ambiently.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    cities: Vec<Arc<City>>,
    regions: Vec<Region>,
    by_id: BTreeMap<String, usize>,
}

impl Dataset {
    /// Builds the dataset from raw parsed rows.
    ///
    /// Keeps rows with a municipal population of at least
    /// [`POPULATION_THRESHOLD`], attaches coordinates from `registry`
    /// where known (unknown codes are silently left without), and derives
    /// the region list from the kept rows, sorted by code.
    #[must_use]
    pub fn build(rows: Vec<City>, registry: &CoordinateRegistry) -> Self {
        let total_rows = rows.len();

        let cities: Vec<Arc<City>> = rows
            .into_iter()
            .filter(|c| c.population.municipal >= POPULATION_THRESHOLD)
            .map(|c| match registry.get(&c.id) {
                Some(coordinates) => Arc::new(c.with_coordinates(coordinates)),
                None => Arc::new(c),
            })
            .collect();

        let mut regions: BTreeMap<&str, &str> = BTreeMap::new();
        for city in &cities {
            if !city.region_code.is_empty() {
                regions
                    .entry(city.region_code.as_str())
                    .or_insert(city.region_name.as_str());
            }
        }
        let regions: Vec<Region> = regions
            .into_iter()
            .map(|(code, name)| Region {
                code: code.to_string(),
                name: name.to_string(),
            })
            .collect();

        let mut by_id = BTreeMap::new();
        for (i, city) in cities.iter().enumerate() {
            by_id.entry(city.id.clone()).or_insert(i);
        }

        let mappable = cities.iter().filter(|c| c.is_mappable()).count();
        log::info!(
            "Dataset: {total_rows} rows, {} cities >= {POPULATION_THRESHOLD} inhabitants, \
             {mappable} with coordinates, {} regions",
            cities.len(),
            regions.len()
        );

        Self {
            cities,
            regions,
            by_id,
        }
    }

    /// All kept cities, in dataset order.
    #[must_use]
    pub fn cities(&self) -> &[Arc<City>] {
        &self.cities
    }

    /// Kept cities that have coordinates, in dataset order. Only these can
    /// be drawn on the map, selected, or sent to the weather provider.
    pub fn mappable(&self) -> impl Iterator<Item = &Arc<City>> {
        self.cities.iter().filter(|c| c.is_mappable())
    }

    /// Regions present in the dataset, sorted by code.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Looks up a city by commune code.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Arc<City>> {
        self.by_id.get(id).map(|&i| &self.cities[i])
    }

    /// Cities of a region, in dataset order.
    #[must_use]
    pub fn in_region(&self, region_code: &str) -> Vec<Arc<City>> {
        self.cities
            .iter()
            .filter(|c| c.region_code == region_code)
            .cloned()
            .collect()
    }

    /// Whether the region code appears in the dataset.
    #[must_use]
    pub fn has_region(&self, region_code: &str) -> bool {
        self.regions.iter().any(|r| r.code == region_code)
    }
}
