//! Commune code to centre-point registry.
//!
//! The registry endpoint returns a JSON array shaped like
//! `[{"code": "75056", "centre": {"type": "Point", "coordinates": [2.347, 48.859]}}]`.
//! Entries without a centre are ignored; communes missing from the
//! registry simply stay off the map.

use std::collections::BTreeMap;

use city_compare_city_models::Coordinates;
use serde::Deserialize;

use crate::DatasetError;

#[derive(Debug, Deserialize)]
struct RegistryEntry {
    code: String,
    #[serde(default)]
    centre: Option<Centre>,
}

#[derive(Debug, Deserialize)]
struct Centre {
    #[serde(default)]
    coordinates: Option<[f64; 2]>,
}

/// Lookup from commune code to [`Coordinates`].
#[derive(Debug, Clone, Default)]
pub struct CoordinateRegistry {
    entries: BTreeMap<String, Coordinates>,
}

impl CoordinateRegistry {
    /// Parses the registry JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Json`] if the body is not an array of
    /// registry entries.
    pub fn parse(json: &str) -> Result<Self, DatasetError> {
        let raw: Vec<RegistryEntry> = serde_json::from_str(json)?;
        let total = raw.len();

        let registry = Self::from_entries(raw.into_iter().filter_map(|entry| {
            let [longitude, latitude] = entry.centre?.coordinates?;
            Some((
                entry.code,
                Coordinates {
                    longitude,
                    latitude,
                },
            ))
        }));

        log::info!(
            "Coordinate registry: {} of {total} communes have a centre",
            registry.len()
        );
        Ok(registry)
    }

    /// Builds a registry from `(code, coordinates)` pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Coordinates)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Coordinates of a commune, if known.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<Coordinates> {
        self.entries.get(code).copied()
    }

    /// Number of communes with coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
