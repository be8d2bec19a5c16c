//! Per-selection weather join.
//!
//! When a pair of cities becomes active, one request per city is issued
//! concurrently and both must settle before the weather panel renders.
//! Any failure degrades the panel as a whole; a lone success is never
//! shown.
//!
//! Every join carries the generation it was started under. Starting a new
//! join or invalidating the current one bumps the generation, so an
//! outcome that arrives after the selection moved on is recognised as
//! stale and dropped by [`AsyncJoinOrchestrator::settle`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use city_compare_weather_models::WeatherSnapshot;

use crate::{WeatherError, WeatherProvider, WeatherRequest};

/// Snapshots for both cities of a pair, keyed by city id.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPair {
    snapshots: BTreeMap<String, WeatherSnapshot>,
}

impl WeatherPair {
    /// Snapshot for a city.
    #[must_use]
    pub fn get(&self, city_id: &str) -> Option<&WeatherSnapshot> {
        self.snapshots.get(city_id)
    }
}

/// How much of a join failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureExtent {
    /// Some requests succeeded; their results are discarded anyway.
    Partial,
    /// Every request failed.
    Total,
}

/// A join in which at least one request failed.
#[derive(Debug, thiserror::Error)]
#[error("Weather unavailable: {} of {requested} requests failed", .failures.len())]
pub struct WeatherJoinError {
    /// Failure per city id.
    pub failures: BTreeMap<String, WeatherError>,
    /// Number of requests issued.
    pub requested: usize,
}

impl WeatherJoinError {
    /// Whether any request succeeded.
    #[must_use]
    pub fn extent(&self) -> FailureExtent {
        if self.failures.len() >= self.requested {
            FailureExtent::Total
        } else {
            FailureExtent::Partial
        }
    }
}

/// Result of one join, tagged with the generation it was started under.
#[derive(Debug)]
pub struct JoinOutcome {
    /// Generation the join was started under.
    pub generation: u64,
    /// Both snapshots, or the failures.
    pub result: Result<WeatherPair, WeatherJoinError>,
}

/// Issues and joins the weather requests for the selected pair.
pub struct AsyncJoinOrchestrator {
    provider: Arc<dyn WeatherProvider>,
    timeout: Duration,
    generation: AtomicU64,
}

impl AsyncJoinOrchestrator {
    /// Creates an orchestrator with a per-request timeout.
    #[must_use]
    pub fn new(provider: Arc<dyn WeatherProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            generation: AtomicU64::new(0),
        }
    }

    /// Starts a new join generation and returns it. Outcomes of earlier
    /// generations become stale.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Marks any pending join as stale without starting a new one.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Current generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether `generation` is still the current one.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    async fn fetch_one(&self, request: &WeatherRequest) -> Result<WeatherSnapshot, WeatherError> {
        match tokio::time::timeout(self.timeout, self.provider.forecast(request)).await {
            Ok(result) => result,
            Err(_) => Err(WeatherError::Timeout {
                timeout: self.timeout,
            }),
        }
    }

    /// Fetches both cities concurrently and waits for both to settle.
    ///
    /// `generation` should come from [`Self::begin`]; it is carried through
    /// to the outcome unchanged.
    pub async fn fetch_pair(&self, generation: u64, requests: [WeatherRequest; 2]) -> JoinOutcome {
        let [first, second] = &requests;
        log::info!(
            "Weather join {generation}: fetching {} and {}",
            first.city_id,
            second.city_id
        );

        let (first_result, second_result) =
            tokio::join!(self.fetch_one(first), self.fetch_one(second));

        let mut snapshots = BTreeMap::new();
        let mut failures = BTreeMap::new();
        for (request, result) in [(first, first_result), (second, second_result)] {
            match result {
                Ok(snapshot) => {
                    snapshots.insert(request.city_id.clone(), snapshot);
                }
                Err(e) => {
                    log::warn!("Weather for {} failed: {e}", request.city_id);
                    failures.insert(request.city_id.clone(), e);
                }
            }
        }

        let result = if failures.is_empty() {
            log::info!("Weather join {generation}: settled");
            Ok(WeatherPair { snapshots })
        } else {
            let error = WeatherJoinError {
                failures,
                requested: requests.len(),
            };
            log::warn!("Weather join {generation}: {error} ({:?})", error.extent());
            Err(error)
        };

        JoinOutcome { generation, result }
    }

    /// Accepts an outcome if its generation is still current.
    ///
    /// Returns `None` (and logs) for a stale outcome, which must not be
    /// rendered.
    pub fn settle(&self, outcome: JoinOutcome) -> Option<Result<WeatherPair, WeatherJoinError>> {
        if self.is_current(outcome.generation) {
            Some(outcome.result)
        } else {
            log::debug!(
                "Discarding stale weather join {} (current is {})",
                outcome.generation,
                self.generation()
            );
            None
        }
    }
}
