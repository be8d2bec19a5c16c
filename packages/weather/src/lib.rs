#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weather fetching for the selected pair.
//!
//! [`WeatherProvider`] is the seam to the outside world; [`open_meteo`]
//! implements it over HTTP. [`join::AsyncJoinOrchestrator`] issues one
//! request per selected city, joins both, and tags the outcome with a
//! generation so results for an outdated selection can be dropped.

pub mod join;
pub mod open_meteo;

use std::time::Duration;

use city_compare_city_models::City;
use city_compare_weather_models::WeatherSnapshot;

/// Errors that can occur while fetching weather for one city.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The provider did not answer in time.
    #[error("Request timed out after {}s", timeout.as_secs_f64())]
    Timeout {
        /// The configured limit.
        timeout: Duration,
    },

    /// The provider answered with a non-success status.
    #[error("Provider error: {message}")]
    Provider {
        /// Description of what went wrong.
        message: String,
    },

    /// The response parsed but is inconsistent.
    #[error("Malformed response: {message}")]
    Malformed {
        /// Description of what went wrong.
        message: String,
    },

    /// The city has no coordinates to query with.
    #[error("City {city_id} has no coordinates")]
    NoCoordinates {
        /// Commune code.
        city_id: String,
    },
}

/// One forecast request.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRequest {
    /// Commune code the result is keyed by.
    pub city_id: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl WeatherRequest {
    /// Builds the request for a city.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::NoCoordinates`] if the city was never
    /// matched in the coordinate registry.
    pub fn for_city(city: &City) -> Result<Self, WeatherError> {
        let coordinates = city.coordinates.ok_or_else(|| WeatherError::NoCoordinates {
            city_id: city.id.clone(),
        })?;
        Ok(Self {
            city_id: city.id.clone(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        })
    }
}

/// Source of current conditions and a daily forecast.
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches the forecast at the request's coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError`] if the request fails or the response is
    /// unusable.
    async fn forecast(&self, request: &WeatherRequest) -> Result<WeatherSnapshot, WeatherError>;
}

#[cfg(test)]
mod tests {
    use city_compare_city_models::{Coordinates, Population};

    use super::*;

    fn city(coordinates: Option<Coordinates>) -> City {
        City {
            id: "75056".to_string(),
            name: "Paris".to_string(),
            region_code: "11".to_string(),
            region_name: "Île-de-France".to_string(),
            population: Population::default(),
            coordinates,
        }
    }

    #[test]
    fn request_uses_city_coordinates() {
        let request = WeatherRequest::for_city(&city(Some(Coordinates {
            longitude: 2.347,
            latitude: 48.859,
        })))
        .unwrap();
        assert_eq!(request.city_id, "75056");
        assert!((request.latitude - 48.859).abs() < 1e-9);
        assert!((request.longitude - 2.347).abs() < 1e-9);
    }

    #[test]
    fn city_without_coordinates_cannot_be_requested() {
        assert!(matches!(
            WeatherRequest::for_city(&city(None)),
            Err(WeatherError::NoCoordinates { city_id }) if city_id == "75056"
        ));
    }

    #[test]
    fn timeout_message_is_plain_text() {
        let err = WeatherError::Timeout {
            timeout: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "Request timed out after 10s");
    }
}
