//! Output side of the dashboard.
//!
//! Everything the dashboard draws leaves through a [`RenderSurface`] as a
//! [`ViewUpdate`]. Panel updates carry the keyed transition frames
//! produced by the diff engine; a front end replays them as animations.

use city_compare_city_models::{PopulationMetric, Region, Slot};
use city_compare_diff::Frame;

use crate::panels::climate::{ClimateMark, ClimateSeries};
use crate::panels::donut::{DonutKind, Slice};
use crate::panels::forecast::Series;
use crate::panels::{Circle, Point, Rect};
use crate::view::{CityCard, Kpi, PanelStatus, Section};

/// One change to what is on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// Regions available in the region selector.
    Regions(Vec<Region>),
    /// The region the ranking shows.
    RankedRegion(String),
    /// Top cities of the ranked region.
    Ranking(Frame<String, Rect>),
    /// A city card.
    Card(CityCard),
    /// Summary sentence, or `None` to clear it.
    Summary(Option<String>),
    /// Visibility of a section.
    Status(Section, PanelStatus),
    /// KPI cards of a section. Empty to clear.
    Kpis(Section, Vec<Kpi>),
    /// Population circles.
    Circles(Frame<(PopulationMetric, Slot), Circle>),
    /// Employment grouped bars.
    Employment(Frame<(&'static str, Slot), Rect>),
    /// One donut.
    Donut(DonutKind, Slot, Frame<String, Slice>),
    /// Forecast lines, with their day labels.
    Forecast(Vec<String>, Frame<(Slot, Series, chrono::NaiveDate), Point>),
    /// Monthly climate chart.
    Climate(Frame<(Slot, ClimateSeries, usize), ClimateMark>),
}

impl ViewUpdate {
    /// Short description for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Regions(regions) => format!("{} regions", regions.len()),
            Self::RankedRegion(code) => format!("ranking region {code}"),
            Self::Ranking(frame) => frame_summary(frame),
            Self::Card(card) => format!("card {:?}", card.slot()),
            Self::Summary(Some(text)) => text.clone(),
            Self::Summary(None) => "summary cleared".to_string(),
            Self::Status(section, status) => format!("{section:?} -> {status:?}"),
            Self::Kpis(section, rows) => format!("{section:?}: {} KPIs", rows.len()),
            Self::Circles(frame) => frame_summary(frame),
            Self::Employment(frame) => frame_summary(frame),
            Self::Donut(kind, slot, frame) => format!("{kind} {slot:?}: {}", frame_summary(frame)),
            Self::Forecast(_, frame) => frame_summary(frame),
            Self::Climate(frame) => frame_summary(frame),
        }
    }
}

fn frame_summary<K, V>(frame: &Frame<K, V>) -> String {
    use city_compare_diff::Phase;

    format!(
        "{}: +{} ~{} -{}",
        frame.panel,
        frame.count(Phase::Enter),
        frame.count(Phase::Update),
        frame.count(Phase::Exit)
    )
}

/// Receives view updates. Implementations must be `Send + Sync` so the
/// dashboard task can own one behind an `Arc`.
pub trait RenderSurface: Send + Sync {
    /// Applies one update.
    fn render(&self, update: ViewUpdate);
}

/// Writes every update to the log.
pub struct LogSurface;

impl RenderSurface for LogSurface {
    fn render(&self, update: ViewUpdate) {
        log::info!("{}", update.describe());
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use std::sync::Mutex;

    use super::{RenderSurface, ViewUpdate};

    /// Keeps every update for inspection.
    #[derive(Default)]
    pub struct RecordingSurface {
        updates: Mutex<Vec<ViewUpdate>>,
    }

    impl RecordingSurface {
        pub fn take(&self) -> Vec<ViewUpdate> {
            std::mem::take(&mut *self.updates.lock().unwrap())
        }
    }

    impl RenderSurface for RecordingSurface {
        fn render(&self, update: ViewUpdate) {
            self.updates.lock().unwrap().push(update);
        }
    }
}
