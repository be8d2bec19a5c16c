#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weather snapshot types and the condition-code table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of daily forecast entries requested per city.
pub const FORECAST_DAYS: usize = 7;

/// Conditions at request time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    /// Air temperature, °C.
    pub temperature: f64,
    /// Wind speed, km/h.
    pub wind_speed: f64,
    /// WMO weather code.
    pub condition_code: u16,
}

impl CurrentConditions {
    /// Description and icon of the current condition.
    #[must_use]
    pub fn condition(&self) -> ConditionInfo {
        describe_condition(self.condition_code)
    }
}

/// One day of the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// Local calendar date.
    pub date: NaiveDate,
    /// Maximum temperature, °C.
    pub temp_max: f64,
    /// Minimum temperature, °C.
    pub temp_min: f64,
    /// Precipitation sum, mm.
    pub precipitation: f64,
    /// WMO weather code.
    pub condition_code: u16,
}

impl DailyForecast {
    /// Short axis label, e.g. `"Mon 19"`.
    #[must_use]
    pub fn label(&self) -> String {
        self.date.format("%a %-d").to_string()
    }
}

/// Current conditions plus a daily forecast for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Conditions now.
    pub current: CurrentConditions,
    /// One entry per day, starting today.
    pub daily: Vec<DailyForecast>,
}

/// Human-readable form of a condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionInfo {
    /// Short description.
    pub description: &'static str,
    /// Emoji icon.
    pub icon: &'static str,
}

/// Returned for codes outside the known table.
pub const UNKNOWN_CONDITION: ConditionInfo = ConditionInfo {
    description: "Unknown",
    icon: "❓",
};

/// Condition codes with a known description.
pub const KNOWN_CONDITIONS: &[u16] = &[
    0, 1, 2, 3, 45, 48, 51, 53, 55, 61, 63, 65, 71, 73, 75, 80, 81, 82, 85, 86, 95, 96, 99,
];

/// Maps a WMO weather code to a description and icon.
///
/// Returns [`UNKNOWN_CONDITION`] for unrecognized codes.
#[must_use]
pub const fn describe_condition(code: u16) -> ConditionInfo {
    let (description, icon) = match code {
        0 => ("Clear sky", "☀️"),
        1 => ("Mainly clear", "🌤️"),
        2 => ("Partly cloudy", "⛅"),
        3 => ("Overcast", "☁️"),
        45 => ("Fog", "🌫️"),
        48 => ("Freezing fog", "🌫️"),
        51 => ("Light drizzle", "🌦️"),
        53 => ("Drizzle", "🌦️"),
        55 => ("Heavy drizzle", "🌧️"),
        61 => ("Light rain", "🌦️"),
        63 => ("Moderate rain", "🌧️"),
        65 => ("Heavy rain", "🌧️"),
        71 => ("Light snow", "🌨️"),
        73 => ("Snow", "❄️"),
        75 => ("Heavy snow", "❄️"),
        80 => ("Showers", "🌦️"),
        81 => ("Moderate showers", "🌧️"),
        82 => ("Heavy showers", "🌧️"),
        85 => ("Snow showers", "🌨️"),
        86 => ("Heavy snow showers", "❄️"),
        95 => ("Thunderstorm", "⛈️"),
        96 => ("Thunderstorm with hail", "⛈️"),
        99 => ("Severe thunderstorm", "⛈️"),
        _ => return UNKNOWN_CONDITION,
    };
    ConditionInfo { description, icon }
}
