//! Twelve-month climate chart: temperature lines on the left axis,
//! precipitation bars on the right one.

use city_compare_city_models::Slot;
use city_compare_diff::{PanelAdapter, Phase, Timing};
use city_compare_stats_models::{ClimateStats, MONTH_LABELS};

use super::{Point, Rect, Size};
use crate::palette::slot_color;
use crate::scale::{LinearScale, PointScale, extent};

/// Drawable area of the climate chart.
pub const SIZE: Size = Size::inside(950.0, 350.0, [50.0, 60.0, 50.0, 50.0]);

const TEMPERATURE_MARGIN: f64 = 3.0;
const PRECIPITATION_HEADROOM: f64 = 1.3;
const BAR_OPACITY: f64 = 0.35;

/// Which curve a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClimateSeries {
    /// Mean temperature, drawn as a line.
    Temperature,
    /// Precipitation, drawn as bars.
    Precipitation,
}

/// One monthly value of one city.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateValue {
    /// Which city.
    pub slot: Slot,
    /// Which curve.
    pub series: ClimateSeries,
    /// Zero-based month.
    pub month: usize,
    /// °C or mm.
    pub value: f64,
}

/// Marks on the climate chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ClimateMark {
    /// Temperature line vertex.
    Point(Point),
    /// Precipitation bar.
    Bar(Rect),
}

/// All 48 values for a pair.
#[must_use]
pub fn climate_values(first: &ClimateStats, second: &ClimateStats) -> Vec<ClimateValue> {
    let mut values = Vec::with_capacity(48);
    for (slot, stats) in [(Slot::First, first), (Slot::Second, second)] {
        for (series, curve) in [
            (ClimateSeries::Temperature, &stats.temperatures),
            (ClimateSeries::Precipitation, &stats.precipitation),
        ] {
            values.extend(curve.iter().map(|m| ClimateValue {
                slot,
                series,
                month: m.month,
                value: m.value,
            }));
        }
    }
    values
}

/// Marks keyed by `(slot, series, month)`.
#[derive(Debug, Clone)]
pub struct ClimateChart {
    x: PointScale,
    temperature: LinearScale,
    precipitation: LinearScale,
}

impl ClimateChart {
    /// Both axes over the given values.
    #[must_use]
    pub fn new(values: &[ClimateValue]) -> Self {
        let of = |series| {
            values
                .iter()
                .filter(move |v| v.series == series)
                .map(|v| v.value)
        };
        let (t_lo, t_hi) = extent(of(ClimateSeries::Temperature)).unwrap_or((0.0, 0.0));
        let p_hi = of(ClimateSeries::Precipitation).fold(0.0, f64::max);

        Self {
            x: PointScale::new(MONTH_LABELS.len(), (0.0, SIZE.width)),
            temperature: LinearScale::new(
                (t_lo - TEMPERATURE_MARGIN, t_hi + TEMPERATURE_MARGIN),
                (SIZE.height, 0.0),
            ),
            precipitation: LinearScale::new(
                (0.0, p_hi * PRECIPITATION_HEADROOM),
                (SIZE.height, 0.0),
            ),
        }
    }

    /// Two bars share each month slot.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn bar_width() -> f64 {
        SIZE.width / (MONTH_LABELS.len() * 2) as f64
    }
}

impl PanelAdapter for ClimateChart {
    type Datum = ClimateValue;
    type Key = (Slot, ClimateSeries, usize);
    type Visual = ClimateMark;

    fn name(&self) -> &'static str {
        "climate"
    }

    fn key(&self, value: &ClimateValue) -> Self::Key {
        (value.slot, value.series, value.month)
    }

    fn target(&self, value: &ClimateValue, _index: usize) -> ClimateMark {
        let x = self.x.position(value.month);
        match value.series {
            ClimateSeries::Temperature => ClimateMark::Point(Point {
                x,
                y: self.temperature.scale(value.value),
                stroke: slot_color(value.slot),
                dashed: false,
            }),
            ClimateSeries::Precipitation => {
                let width = Self::bar_width();
                let y = self.precipitation.scale(value.value);
                ClimateMark::Bar(Rect {
                    x: match value.slot {
                        Slot::First => x - width,
                        Slot::Second => x,
                    },
                    y,
                    width,
                    height: SIZE.height - y,
                    fill: slot_color(value.slot),
                    opacity: BAR_OPACITY,
                })
            }
        }
    }

    fn neutral(&self, value: &ClimateValue, index: usize) -> ClimateMark {
        self.collapse(&self.target(value, index))
    }

    fn collapse(&self, current: &ClimateMark) -> ClimateMark {
        match current {
            ClimateMark::Point(point) => ClimateMark::Point(Point {
                y: SIZE.height,
                ..point.clone()
            }),
            ClimateMark::Bar(rect) => ClimateMark::Bar(rect.flattened(SIZE.height)),
        }
    }

    fn timing(&self, phase: Phase, _index: usize) -> Timing {
        match phase {
            Phase::Enter | Phase::Update => Timing::millis(600),
            Phase::Exit => Timing::millis(400),
        }
    }
}
