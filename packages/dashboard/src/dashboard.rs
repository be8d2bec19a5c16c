//! The dashboard: selection, panels, and the task that owns them.
//!
//! [`Dashboard`] holds every piece of mutable view state and is driven
//! synchronously: each event goes through [`reduce`] and the resulting
//! [`Effect`]s are applied in order. Weather is the only asynchronous
//! work; applying [`Effect::FetchWeather`] hands back a [`WeatherJob`] for
//! the caller to run, and the outcome comes back through
//! [`Dashboard::settle_weather`].
//!
//! [`spawn`] wraps a dashboard in a single task that processes
//! [`Command`]s one at a time, so two selections can never interleave
//! their cascades.

use std::collections::BTreeMap;
use std::sync::Arc;

use city_compare_city_models::{City, Slot};
use city_compare_dataset::Dataset;
use city_compare_dataset::search::SearchIndex;
use city_compare_diff::Panel;
use city_compare_stats_models::CityStats;
use city_compare_weather::WeatherRequest;
use city_compare_weather::join::{AsyncJoinOrchestrator, JoinOutcome};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::palette::RegionPalette;
use crate::panels::circles::{Circles, population_values};
use crate::panels::climate::{ClimateChart, climate_values};
use crate::panels::donut::{Donut, DonutKind};
use crate::panels::forecast::{ForecastLines, day_labels, forecast_points};
use crate::panels::grouped::{GroupedBars, employment_indicators};
use crate::panels::ranked::RankedBars;
use crate::ranking::rank_region;
use crate::selection::{Effect, SelectionEvent, SelectionState, reduce};
use crate::surface::{RenderSurface, ViewUpdate};
use crate::view::{
    CityCard, PanelStatus, Section, WEATHER_UNAVAILABLE, comparison_summary, employment_kpis,
    housing_kpis, weather_kpis,
};

const COMMAND_BUFFER: usize = 32;

/// Errors returned by a [`DashboardHandle`].
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The dashboard task is no longer running.
    #[error("Dashboard task has stopped")]
    Closed,
}

impl<T> From<mpsc::error::SendError<T>> for DashboardError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        Self::Closed
    }
}

impl From<oneshot::error::RecvError> for DashboardError {
    fn from(_: oneshot::error::RecvError) -> Self {
        Self::Closed
    }
}

/// A weather join to run for the pair that was just selected.
#[derive(Debug, Clone)]
pub struct WeatherJob {
    /// Join generation the outcome will be checked against.
    pub generation: u64,
    /// One request per slot.
    pub requests: [WeatherRequest; 2],
}

impl WeatherJob {
    /// Runs the join to completion.
    pub async fn run(self, orchestrator: &AsyncJoinOrchestrator) -> JoinOutcome {
        orchestrator
            .fetch_pair(self.generation, self.requests)
            .await
    }
}

/// Dashboard state and its panels.
pub struct Dashboard {
    dataset: Arc<Dataset>,
    search: SearchIndex,
    palette: RegionPalette,
    orchestrator: Arc<AsyncJoinOrchestrator>,
    surface: Arc<dyn RenderSurface>,
    selection: SelectionState,
    ranked_region: Option<String>,
    stats: Option<[CityStats; 2]>,
    ranking: Panel<RankedBars>,
    circles: Panel<Circles>,
    employment: Panel<GroupedBars>,
    donuts: BTreeMap<(DonutKind, Slot), Panel<Donut>>,
    forecast: Panel<ForecastLines>,
    climate: Panel<ClimateChart>,
}

impl Dashboard {
    /// Creates a dashboard over a loaded dataset. Nothing is drawn until
    /// [`Self::start`].
    #[must_use]
    pub fn new(
        dataset: Arc<Dataset>,
        orchestrator: Arc<AsyncJoinOrchestrator>,
        surface: Arc<dyn RenderSurface>,
    ) -> Self {
        Self {
            search: SearchIndex::new(&dataset),
            palette: RegionPalette::new(dataset.regions()),
            dataset,
            orchestrator,
            surface,
            selection: SelectionState::Empty,
            ranked_region: None,
            stats: None,
            ranking: Panel::new(),
            circles: Panel::new(),
            employment: Panel::new(),
            donuts: BTreeMap::new(),
            forecast: Panel::new(),
            climate: Panel::new(),
        }
    }

    /// Draws the initial view: region list, empty cards, hidden sections,
    /// and the ranking of the first region.
    pub fn start(&mut self) {
        log::info!(
            "Dashboard starting with {} cities in {} regions",
            self.dataset.cities().len(),
            self.dataset.regions().len()
        );
        self.surface
            .render(ViewUpdate::Regions(self.dataset.regions().to_vec()));
        self.refresh_cards();
        for section in Section::ALL {
            self.surface
                .render(ViewUpdate::Status(section, PanelStatus::Hidden));
        }
        if let Some(first) = self.dataset.regions().first() {
            let code = first.code.clone();
            self.rank(&code);
        }
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Stats of the selected pair, in slot order.
    #[must_use]
    pub const fn stats(&self) -> Option<&[CityStats; 2]> {
        self.stats.as_ref()
    }

    /// Region shown in the ranking panel.
    #[must_use]
    pub fn ranked_region(&self) -> Option<&str> {
        self.ranked_region.as_deref()
    }

    /// Searches selectable cities by name.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Arc<City>> {
        self.search.search(query)
    }

    /// Selects a city by id. Unknown ids and cities without coordinates
    /// are ignored.
    pub fn select(&mut self, city_id: &str) -> Option<WeatherJob> {
        let Some(city) = self.dataset.find(city_id) else {
            log::warn!("Ignoring selection of unknown city {city_id}");
            return None;
        };
        if !city.is_mappable() {
            log::warn!("Ignoring selection of {} ({city_id}): no coordinates", city.name);
            return None;
        }
        let city = Arc::clone(city);
        self.dispatch(SelectionEvent::Select(city))
    }

    /// Resets the selection.
    pub fn clear(&mut self) {
        self.dispatch(SelectionEvent::Clear);
    }

    /// Shows the ranking of another region. Unknown codes are ignored.
    pub fn select_region(&mut self, code: &str) {
        if !self.dataset.has_region(code) {
            log::debug!("Ignoring unknown region {code:?}");
            return;
        }
        self.dispatch(SelectionEvent::SelectRegion(code.to_string()));
    }

    /// Applies an event and carries out its effects.
    pub fn dispatch(&mut self, event: SelectionEvent) -> Option<WeatherJob> {
        let (next, effects) = reduce(&self.selection, event);
        if next != self.selection {
            log::debug!(
                "Selection {:?} -> {:?}",
                self.selection.ids(),
                next.ids()
            );
        }
        self.selection = next;

        let mut job = None;
        for effect in effects {
            match effect {
                Effect::RefreshCards => self.refresh_cards(),
                Effect::RankRegion(code) => self.rank(&code),
                Effect::ComparePair => self.compare_pair(),
                Effect::FetchWeather => job = self.weather_job(),
                Effect::ClearComparison => self.clear_comparison(),
            }
        }
        job
    }

    /// Renders a settled weather join, unless the selection has moved on
    /// since it started.
    pub fn settle_weather(&mut self, outcome: JoinOutcome) {
        let Some(result) = self.orchestrator.settle(outcome) else {
            return;
        };

        let snapshots = result.map_err(|e| e.to_string()).and_then(|pair| {
            let (a, b) = self
                .selection
                .pair()
                .ok_or_else(|| "selection changed".to_string())?;
            match (pair.get(&a.id), pair.get(&b.id)) {
                (Some(first), Some(second)) => Ok((first.clone(), second.clone())),
                _ => Err(format!("weather for {} and {} incomplete", a.id, b.id)),
            }
        });

        match snapshots {
            Ok((first, second)) => {
                self.surface.render(ViewUpdate::Kpis(
                    Section::Weather,
                    weather_kpis(&first, &second),
                ));
                let points = forecast_points(&first, &second);
                let frame = self.forecast.render(&ForecastLines::new(&points), &points);
                self.surface
                    .render(ViewUpdate::Forecast(day_labels(&first), frame));
                self.surface
                    .render(ViewUpdate::Status(Section::Weather, PanelStatus::Ready));
            }
            Err(message) => {
                log::warn!("Weather panel degraded: {message}");
                self.surface
                    .render(ViewUpdate::Kpis(Section::Weather, Vec::new()));
                self.surface.render(ViewUpdate::Status(
                    Section::Weather,
                    PanelStatus::Degraded(WEATHER_UNAVAILABLE.to_string()),
                ));
            }
        }
    }

    fn refresh_cards(&self) {
        for slot in Slot::ALL {
            let city = self.selection.slot(slot).map(Arc::as_ref);
            self.surface.render(ViewUpdate::Card(CityCard::new(slot, city)));
        }
    }

    fn rank(&mut self, code: &str) {
        let ranking = rank_region(&self.dataset, code);
        log::debug!("Ranking region {code}: {} cities shown", ranking.len());

        let adapter = RankedBars::new(&ranking, self.palette.clone());
        let frame = self.ranking.render(&adapter, &ranking);
        self.ranked_region = Some(code.to_string());
        self.surface
            .render(ViewUpdate::RankedRegion(code.to_string()));
        self.surface.render(ViewUpdate::Ranking(frame));
    }

    fn compare_pair(&mut self) {
        let Some((a, b)) = self.selection.pair() else {
            return;
        };
        let (a, b) = (Arc::clone(a), Arc::clone(b));
        let stats = [city_compare_stats::generate(&a), city_compare_stats::generate(&b)];
        log::info!("Comparing {} ({}) with {} ({})", a.name, a.id, b.name, b.id);

        self.surface
            .render(ViewUpdate::Summary(Some(comparison_summary(&a, &b))));
        let values = population_values(&a, &b);
        let frame = self.circles.render(&Circles::new(&values), &values);
        self.surface.render(ViewUpdate::Circles(frame));

        let [first, second] = &stats;
        self.surface.render(ViewUpdate::Kpis(
            Section::Employment,
            employment_kpis(&first.employment, &second.employment),
        ));
        let indicators = employment_indicators(&first.employment, &second.employment);
        let frame = self
            .employment
            .render(&GroupedBars::new(&indicators), &indicators);
        self.surface.render(ViewUpdate::Employment(frame));

        self.surface.render(ViewUpdate::Kpis(
            Section::Housing,
            housing_kpis(&first.housing, &second.housing),
        ));
        for kind in DonutKind::ALL {
            for (slot, city_stats) in [(Slot::First, first), (Slot::Second, second)] {
                let shares = &kind.group(city_stats).shares;
                let frame = self
                    .donuts
                    .entry((kind, slot))
                    .or_default()
                    .render(&Donut::new(shares), shares);
                self.surface.render(ViewUpdate::Donut(kind, slot, frame));
            }
        }

        let values = climate_values(&first.climate, &second.climate);
        let frame = self.climate.render(&ClimateChart::new(&values), &values);
        self.surface.render(ViewUpdate::Climate(frame));

        for section in [
            Section::Comparison,
            Section::Employment,
            Section::Housing,
            Section::Climate,
        ] {
            self.surface
                .render(ViewUpdate::Status(section, PanelStatus::Ready));
        }
        self.stats = Some(stats);
    }

    fn weather_job(&self) -> Option<WeatherJob> {
        let (a, b) = self.selection.pair()?;
        let requests = match (WeatherRequest::for_city(a), WeatherRequest::for_city(b)) {
            (Ok(first), Ok(second)) => [first, second],
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("Cannot fetch weather: {e}");
                self.surface.render(ViewUpdate::Status(
                    Section::Weather,
                    PanelStatus::Degraded(WEATHER_UNAVAILABLE.to_string()),
                ));
                return None;
            }
        };
        let generation = self.orchestrator.begin();
        self.surface
            .render(ViewUpdate::Status(Section::Weather, PanelStatus::Loading));
        Some(WeatherJob {
            generation,
            requests,
        })
    }

    fn clear_comparison(&mut self) {
        self.orchestrator.invalidate();
        self.stats = None;

        self.surface.render(ViewUpdate::Summary(None));
        let frame = self.circles.clear(&Circles::new(&[]));
        self.surface.render(ViewUpdate::Circles(frame));
        let frame = self.employment.clear(&GroupedBars::new(&[]));
        self.surface.render(ViewUpdate::Employment(frame));
        for (&(kind, slot), panel) in &mut self.donuts {
            let frame = panel.clear(&Donut::new(&[]));
            self.surface.render(ViewUpdate::Donut(kind, slot, frame));
        }
        let frame = self.forecast.clear(&ForecastLines::new(&[]));
        self.surface.render(ViewUpdate::Forecast(Vec::new(), frame));
        let frame = self.climate.clear(&ClimateChart::new(&[]));
        self.surface.render(ViewUpdate::Climate(frame));

        for section in [Section::Employment, Section::Housing, Section::Weather] {
            self.surface.render(ViewUpdate::Kpis(section, Vec::new()));
        }
        for section in Section::ALL {
            self.surface
                .render(ViewUpdate::Status(section, PanelStatus::Hidden));
        }
    }

    async fn run(mut self, mut rx: mpsc::Receiver<Command>, reports: mpsc::WeakSender<Command>) {
        self.start();

        while let Some(command) = rx.recv().await {
            let job = match command {
                Command::Select { city_id } => self.select(&city_id),
                Command::Clear => {
                    self.clear();
                    None
                }
                Command::SelectRegion { code } => {
                    self.select_region(&code);
                    None
                }
                Command::Search { query, reply } => {
                    let _ = reply.send(self.search(&query));
                    None
                }
                Command::Selection { reply } => {
                    let _ = reply.send(self.selection.clone());
                    None
                }
                Command::WeatherSettled(outcome) => {
                    self.settle_weather(outcome);
                    None
                }
            };

            if let Some(job) = job {
                let Some(tx) = reports.upgrade() else {
                    log::debug!("Dashboard closing; skipping weather join {}", job.generation);
                    continue;
                };
                let orchestrator = Arc::clone(&self.orchestrator);
                tokio::spawn(async move {
                    let outcome = job.run(&orchestrator).await;
                    if tx.send(Command::WeatherSettled(outcome)).await.is_err() {
                        log::debug!("Dashboard stopped before weather settled");
                    }
                });
            }
        }

        log::info!("Dashboard stopped");
    }
}

/// Messages processed by the dashboard task.
#[derive(Debug)]
pub enum Command {
    /// Select a city by id.
    Select {
        /// Commune code.
        city_id: String,
    },
    /// Reset the selection.
    Clear,
    /// Show another region in the ranking.
    SelectRegion {
        /// Region code.
        code: String,
    },
    /// Search selectable cities by name.
    Search {
        /// Query text.
        query: String,
        /// Where to send the matches.
        reply: oneshot::Sender<Vec<Arc<City>>>,
    },
    /// Read the current selection.
    Selection {
        /// Where to send it.
        reply: oneshot::Sender<SelectionState>,
    },
    /// A weather join finished.
    WeatherSettled(JoinOutcome),
}

/// Cloneable handle to a running dashboard task. The task stops once
/// every handle is dropped.
#[derive(Debug, Clone)]
pub struct DashboardHandle {
    tx: mpsc::Sender<Command>,
}

impl DashboardHandle {
    /// Selects a city.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Closed`] if the task has stopped.
    pub async fn select(&self, city_id: impl Into<String>) -> Result<(), DashboardError> {
        self.tx
            .send(Command::Select {
                city_id: city_id.into(),
            })
            .await?;
        Ok(())
    }

    /// Resets the selection.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Closed`] if the task has stopped.
    pub async fn clear(&self) -> Result<(), DashboardError> {
        self.tx.send(Command::Clear).await?;
        Ok(())
    }

    /// Shows another region in the ranking.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Closed`] if the task has stopped.
    pub async fn select_region(&self, code: impl Into<String>) -> Result<(), DashboardError> {
        self.tx
            .send(Command::SelectRegion { code: code.into() })
            .await?;
        Ok(())
    }

    /// Searches selectable cities by name.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Closed`] if the task has stopped.
    pub async fn search(&self, query: impl Into<String>) -> Result<Vec<Arc<City>>, DashboardError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Search {
                query: query.into(),
                reply,
            })
            .await?;
        Ok(rx.await?)
    }

    /// The selection after every command sent so far has been applied.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Closed`] if the task has stopped.
    pub async fn selection(&self) -> Result<SelectionState, DashboardError> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(Command::Selection { reply }).await?;
        Ok(rx.await?)
    }
}

/// Starts the dashboard task.
#[must_use]
pub fn spawn(dashboard: Dashboard) -> (DashboardHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let reports = tx.downgrade();
    let task = tokio::spawn(dashboard.run(rx, reports));
    (DashboardHandle { tx }, task)
}
