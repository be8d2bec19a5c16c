//! Data source configuration.
//!
//! Defaults are embedded at compile time from `sources/default.toml`; each
//! value can be overridden through an environment variable. No config file
//! is read at runtime.

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_SOURCES: &str = include_str!("../sources/default.toml");

/// Where the dashboard loads its data from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceConfig {
    /// Census table location: a local path or an `http(s)` URL.
    pub dataset: String,
    /// Census table field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Boundary `GeoJSON` location.
    pub boundaries_url: String,
    /// Coordinate registry location.
    pub coordinates_url: String,
    /// Weather forecast endpoint.
    pub weather_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_delimiter() -> String {
    ";".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl SourceConfig {
    /// Returns the compile-time defaults.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (a compile-time guarantee
    /// since the file is embedded).
    #[must_use]
    pub fn embedded() -> Self {
        toml::de::from_str(DEFAULT_SOURCES)
            .unwrap_or_else(|e| panic!("Failed to parse embedded source config: {e}"))
    }

    /// Returns the defaults with environment overrides applied:
    ///
    /// - `CITY_COMPARE_DATASET`
    /// - `CITY_COMPARE_BOUNDARIES_URL`
    /// - `CITY_COMPARE_COORDINATES_URL`
    /// - `CITY_COMPARE_WEATHER_URL`
    /// - `CITY_COMPARE_TIMEOUT_SECS`
    #[must_use]
    pub fn from_env() -> Self {
        Self::embedded().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary lookup (the environment in
    /// production, a map in tests). Unparseable timeouts are ignored.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dataset) = lookup("CITY_COMPARE_DATASET") {
            self.dataset = dataset;
        }
        if let Some(url) = lookup("CITY_COMPARE_BOUNDARIES_URL") {
            self.boundaries_url = url;
        }
        if let Some(url) = lookup("CITY_COMPARE_COORDINATES_URL") {
            self.coordinates_url = url;
        }
        if let Some(url) = lookup("CITY_COMPARE_WEATHER_URL") {
            self.weather_url = url;
        }
        if let Some(secs) = lookup("CITY_COMPARE_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.timeout_secs = secs;
        }
        self
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The delimiter as a single byte, falling back to `;`.
    #[must_use]
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b';')
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn embedded_defaults_parse() {
        let config = SourceConfig::embedded();
        assert!(!config.dataset.is_empty());
        assert!(config.boundaries_url.starts_with("https://"));
        assert!(config.coordinates_url.starts_with("https://"));
        assert!(config.weather_url.starts_with("https://"));
        assert_eq!(config.delimiter_byte(), b';');
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn overrides_replace_defaults() {
        let env: BTreeMap<&str, &str> = [
            ("CITY_COMPARE_DATASET", "/tmp/communes.csv"),
            ("CITY_COMPARE_WEATHER_URL", "http://localhost:9000/forecast"),
            ("CITY_COMPARE_TIMEOUT_SECS", "3"),
        ]
        .into_iter()
        .collect();

        let config = SourceConfig::embedded()
            .with_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.dataset, "/tmp/communes.csv");
        assert_eq!(config.weather_url, "http://localhost:9000/forecast");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(
            config.boundaries_url,
            SourceConfig::embedded().boundaries_url
        );
    }

    #[test]
    fn bad_timeout_override_is_ignored() {
        let config = SourceConfig::embedded().with_overrides(|key| {
            (key == "CITY_COMPARE_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.timeout_secs, 10);
    }
}
