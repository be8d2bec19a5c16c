//! Open-Meteo forecast provider.
//!
//! Requests current conditions plus a seven-day daily forecast in the
//! `Europe/Paris` timezone.

use chrono::NaiveDate;
use city_compare_weather_models::{
    CurrentConditions, DailyForecast, FORECAST_DAYS, WeatherSnapshot,
};
use serde::Deserialize;

use crate::{WeatherError, WeatherProvider, WeatherRequest};

/// Daily variables requested from the API.
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode";

/// Timezone the daily buckets are computed in.
const TIMEZONE: &str = "Europe/Paris";

/// Open-Meteo API provider.
pub struct OpenMeteoProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OpenMeteoProvider {
    /// Creates a provider against `base_url` (the `/v1/forecast` endpoint).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Creates a provider that shares an existing HTTP client.
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Query parameters for a request.
    fn query(request: &WeatherRequest) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", request.latitude.to_string()),
            ("longitude", request.longitude.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("current_weather", "true".to_string()),
            ("timezone", TIMEZONE.to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
    daily: Daily,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: u16,
}

#[derive(Debug, Deserialize)]
struct Daily {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_sum: Vec<f64>,
    weathercode: Vec<u16>,
}

/// Parses a forecast response body.
///
/// # Errors
///
/// Returns [`WeatherError::Json`] if the body does not match the response
/// shape, or [`WeatherError::Malformed`] if the daily arrays disagree in
/// length or a date is unparseable.
pub fn parse_forecast(body: &str) -> Result<WeatherSnapshot, WeatherError> {
    let response: ForecastResponse = serde_json::from_str(body)?;
    let daily = response.daily;

    let days = daily.time.len();
    let lengths = [
        ("temperature_2m_max", daily.temperature_2m_max.len()),
        ("temperature_2m_min", daily.temperature_2m_min.len()),
        ("precipitation_sum", daily.precipitation_sum.len()),
        ("weathercode", daily.weathercode.len()),
    ];
    if let Some((field, len)) = lengths.iter().find(|(_, len)| *len != days) {
        return Err(WeatherError::Malformed {
            message: format!("daily.{field} has {len} entries, expected {days}"),
        });
    }

    let daily = daily
        .time
        .iter()
        .enumerate()
        .map(|(i, time)| {
            let date = NaiveDate::parse_from_str(time, "%Y-%m-%d").map_err(|e| {
                WeatherError::Malformed {
                    message: format!("invalid date '{time}': {e}"),
                }
            })?;
            Ok(DailyForecast {
                date,
                temp_max: daily.temperature_2m_max[i],
                temp_min: daily.temperature_2m_min[i],
                precipitation: daily.precipitation_sum[i],
                condition_code: daily.weathercode[i],
            })
        })
        .collect::<Result<Vec<_>, WeatherError>>()?;

    Ok(WeatherSnapshot {
        current: CurrentConditions {
            temperature: response.current_weather.temperature,
            wind_speed: response.current_weather.windspeed,
            condition_code: response.current_weather.weathercode,
        },
        daily,
    })
}

#[async_trait::async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn forecast(&self, request: &WeatherRequest) -> Result<WeatherSnapshot, WeatherError> {
        log::debug!(
            "Requesting forecast for {} at ({}, {})",
            request.city_id,
            request.latitude,
            request.longitude
        );

        let resp = self
            .client
            .get(&self.base_url)
            .query(&Self::query(request))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Provider {
                message: format!("Open-Meteo returned HTTP {status}"),
            });
        }

        parse_forecast(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "latitude": 48.86,
        "longitude": 2.34,
        "current_weather": {"temperature": 14.2, "windspeed": 11.5, "winddirection": 240, "weathercode": 3, "time": "2026-10-19T14:00"},
        "daily": {
            "time": ["2026-10-19", "2026-10-20", "2026-10-21"],
            "temperature_2m_max": [16.1, 15.4, 13.0],
            "temperature_2m_min": [9.0, 8.2, 7.5],
            "precipitation_sum": [0.0, 2.4, 6.1],
            "weathercode": [3, 61, 63]
        }
    }"#;

    #[test]
    fn parses_current_and_daily() {
        let snapshot = parse_forecast(BODY).unwrap();

        assert!((snapshot.current.temperature - 14.2).abs() < 1e-9);
        assert!((snapshot.current.wind_speed - 11.5).abs() < 1e-9);
        assert_eq!(snapshot.current.condition_code, 3);

        assert_eq!(snapshot.daily.len(), 3);
        let tuesday = &snapshot.daily[1];
        assert_eq!(tuesday.date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        assert!((tuesday.temp_max - 15.4).abs() < 1e-9);
        assert!((tuesday.precipitation - 2.4).abs() < 1e-9);
        assert_eq!(tuesday.condition_code, 61);
    }

    #[test]
    fn mismatched_daily_lengths_are_malformed() {
        let body = BODY.replace("[0.0, 2.4, 6.1]", "[0.0, 2.4]");
        let err = parse_forecast(&body).unwrap_err();
        assert!(
            matches!(
                &err,
                WeatherError::Malformed { message } if message.contains("precipitation_sum")
            ),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn bad_date_is_malformed() {
        let body = BODY.replace("2026-10-21", "next week");
        assert!(matches!(
            parse_forecast(&body),
            Err(WeatherError::Malformed { .. })
        ));
    }

    #[test]
    fn missing_current_weather_is_a_json_error() {
        let body = r#"{"daily": {"time": [], "temperature_2m_max": [], "temperature_2m_min": [], "precipitation_sum": [], "weathercode": []}}"#;
        assert!(matches!(parse_forecast(body), Err(WeatherError::Json(_))));
    }

    #[test]
    fn query_carries_every_parameter() {
        let request = WeatherRequest {
            city_id: "69123".to_string(),
            latitude: 45.758,
            longitude: 4.835,
        };
        let query = OpenMeteoProvider::query(&request);
        let get = |name: &str| {
            query
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("latitude"), Some("45.758"));
        assert_eq!(get("longitude"), Some("4.835"));
        assert_eq!(get("daily"), Some(DAILY_FIELDS));
        assert_eq!(get("current_weather"), Some("true"));
        assert_eq!(get("timezone"), Some("Europe/Paris"));
        assert_eq!(get("forecast_days"), Some("7"));
    }
}
