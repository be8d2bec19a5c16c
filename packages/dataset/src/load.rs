//! Startup fan-out.
//!
//! Boundaries, census table, and coordinate registry are fetched
//! concurrently and joined before anything renders. The first failure
//! aborts the whole load.

use std::time::Duration;

use geojson::{FeatureCollection, GeoJson};

use crate::config::SourceConfig;
use crate::coordinates::CoordinateRegistry;
use crate::{Dataset, DatasetError, parse};

/// Terminal startup failure, tagged with the branch that failed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Boundary geometry could not be loaded.
    #[error("failed to load boundaries: {0}")]
    Boundaries(#[source] DatasetError),

    /// Census table could not be loaded.
    #[error("failed to load census table: {0}")]
    Dataset(#[source] DatasetError),

    /// Coordinate registry could not be loaded.
    #[error("failed to load coordinate registry: {0}")]
    Coordinates(#[source] DatasetError),
}

/// Everything the dashboard needs before its first render.
#[derive(Debug, Clone)]
pub struct LoadedData {
    /// Boundary polygons for the map background.
    pub boundaries: FeatureCollection,
    /// Filtered, enriched cities.
    pub dataset: Dataset,
}

/// Whether a location should be fetched over HTTP rather than read from
/// disk.
fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Reads a source as text, from HTTP or the local filesystem.
///
/// # Errors
///
/// Returns [`DatasetError`] if the request fails, returns a non-success
/// status, or the file cannot be read.
pub async fn read_source(
    client: &reqwest::Client,
    location: &str,
    timeout: Duration,
) -> Result<String, DatasetError> {
    if is_remote(location) {
        log::debug!("Fetching {location}");
        let response = client
            .get(location)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    } else {
        log::debug!("Reading {location}");
        Ok(tokio::fs::read_to_string(location).await?)
    }
}

/// Parses boundary geometry.
///
/// # Errors
///
/// Returns [`DatasetError`] if the text is not a `GeoJSON` feature
/// collection.
pub fn parse_boundaries(text: &str) -> Result<FeatureCollection, DatasetError> {
    match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) | GeoJson::Geometry(_) => Err(DatasetError::Shape {
            message: "boundaries must be a FeatureCollection".to_string(),
        }),
    }
}

async fn load_boundaries(
    client: &reqwest::Client,
    config: &SourceConfig,
) -> Result<FeatureCollection, DatasetError> {
    let text = read_source(client, &config.boundaries_url, config.timeout()).await?;
    let boundaries = parse_boundaries(&text)?;
    log::info!("Loaded {} boundary features", boundaries.features.len());
    Ok(boundaries)
}

async fn load_table(
    client: &reqwest::Client,
    config: &SourceConfig,
) -> Result<Vec<city_compare_city_models::City>, DatasetError> {
    let text = read_source(client, &config.dataset, config.timeout()).await?;
    parse::parse_cities(&text, config.delimiter_byte())
}

async fn load_coordinates(
    client: &reqwest::Client,
    config: &SourceConfig,
) -> Result<CoordinateRegistry, DatasetError> {
    let text = read_source(client, &config.coordinates_url, config.timeout()).await?;
    CoordinateRegistry::parse(&text)
}

/// Loads all three startup resources concurrently and builds the
/// [`Dataset`].
///
/// # Errors
///
/// Returns the [`LoadError`] of the first branch to fail. Nothing is
/// retried.
pub async fn load_all(
    client: &reqwest::Client,
    config: &SourceConfig,
) -> Result<LoadedData, LoadError> {
    log::info!("Loading boundaries, census table, and coordinates...");

    let result = tokio::try_join!(
        async {
            load_boundaries(client, config)
                .await
                .map_err(LoadError::Boundaries)
        },
        async { load_table(client, config).await.map_err(LoadError::Dataset) },
        async {
            load_coordinates(client, config)
                .await
                .map_err(LoadError::Coordinates)
        },
    );

    let (boundaries, rows, registry) = match result {
        Ok(parts) => parts,
        Err(e) => {
            log::error!("Initial load failed: {e}");
            return Err(e);
        }
    };

    Ok(LoadedData {
        boundaries,
        dataset: Dataset::build(rows, &registry),
    })
}
