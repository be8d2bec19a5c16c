//! City name search.

use std::sync::Arc;

use city_compare_city_models::City;

use crate::Dataset;

/// Shortest query (in characters, after trimming) that produces results.
pub const MIN_QUERY_CHARS: usize = 2;

/// Most results returned for one query.
pub const MAX_RESULTS: usize = 8;

/// Case-insensitive substring lookup over selectable cities.
///
/// Results come back in dataset order, not ranked by relevance.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<(String, Arc<City>)>,
}

impl SearchIndex {
    /// Indexes every city of `dataset` that can be selected (has
    /// coordinates).
    #[must_use]
    pub fn new(dataset: &Dataset) -> Self {
        Self::from_cities(dataset.mappable().cloned())
    }

    /// Indexes the given cities in order.
    pub fn from_cities(cities: impl IntoIterator<Item = Arc<City>>) -> Self {
        Self {
            entries: cities
                .into_iter()
                .map(|city| (city.name.to_lowercase(), city))
                .collect(),
        }
    }

    /// Returns up to [`MAX_RESULTS`] cities whose name contains `query`.
    ///
    /// An empty result means the caller should hide its results list.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Arc<City>> {
        let needle = query.trim().to_lowercase();
        if needle.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|(name, _)| name.contains(&needle))
            .take(MAX_RESULTS)
            .map(|(_, city)| Arc::clone(city))
            .collect()
    }

    /// Number of indexed cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
