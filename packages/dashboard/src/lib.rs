#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City comparison dashboard.
//!
//! Selecting two cities fans out into a cascade of linked views: city
//! cards, a regional ranking, population circles, employment and housing
//! KPIs with their charts, a monthly climate chart, and a live weather
//! forecast. The [`selection`] reducer decides what has to be redrawn,
//! [`panels`] turn data into keyed elements for the diff engine, and
//! [`dashboard`] owns the state and applies the effects.

pub mod dashboard;
pub mod format;
pub mod palette;
pub mod panels;
pub mod ranking;
pub mod scale;
pub mod selection;
pub mod surface;
pub mod view;

pub use dashboard::{Command, Dashboard, DashboardError, DashboardHandle, WeatherJob, spawn};
pub use surface::{LogSurface, RenderSurface, ViewUpdate};

#[cfg(test)]
pub(crate) mod test_fixtures {
    use std::sync::Arc;

    use city_compare_city_models::{City, Coordinates, Population};

    /// Commune centres for the cities the tests use; anything else sits in
    /// the middle of the country.
    fn centre(id: &str) -> Coordinates {
        let (longitude, latitude) = match id {
            "75056" => (2.35, 48.86),
            "69123" => (4.83, 45.76),
            "13055" => (5.37, 43.30),
            "59350" => (3.06, 50.63),
            "06088" => (7.26, 43.70),
            _ => (2.0, 47.0),
        };
        Coordinates {
            longitude,
            latitude,
        }
    }

    pub fn city(id: &str, name: &str, region: &str, municipal: u64) -> Arc<City> {
        let counted_elsewhere = municipal / 100;
        Arc::new(City {
            id: id.to_string(),
            name: name.to_string(),
            region_code: region.to_string(),
            region_name: format!("Region {region}"),
            population: Population {
                municipal,
                counted_elsewhere,
                total: municipal + counted_elsewhere,
            },
            coordinates: Some(centre(id)),
        })
    }
}
