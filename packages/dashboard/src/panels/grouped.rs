//! Side-by-side bars comparing the pair on a few indicators.

use city_compare_city_models::Slot;
use city_compare_diff::{PanelAdapter, Phase, Timing};
use city_compare_stats_models::EmploymentStats;

use super::{Rect, Size};
use crate::palette::slot_color;
use crate::scale::{BandScale, LinearScale};

/// Drawable area of the grouped chart.
pub const SIZE: Size = Size::inside(900.0, 300.0, [40.0, 30.0, 60.0, 80.0]);

const GROUP_PADDING: f64 = 0.3;
const SLOT_PADDING: f64 = 0.08;
const HEADROOM: f64 = 1.15;

/// One bar: an indicator value for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorValue {
    /// Indicator label, also the group key.
    pub indicator: &'static str,
    /// Which city.
    pub slot: Slot,
    /// Value.
    pub value: f64,
}

/// Indicators of the employment comparison chart.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn employment_indicators(
    first: &EmploymentStats,
    second: &EmploymentStats,
) -> Vec<IndicatorValue> {
    let rows: [(&'static str, fn(&EmploymentStats) -> f64); 3] = [
        ("Unemployment (%)", |s| s.unemployment_rate),
        ("Activity (%)", |s| s.activity_rate),
        ("Income (€)", |s| s.median_income as f64),
    ];

    rows.iter()
        .flat_map(|&(indicator, value)| {
            [(Slot::First, first), (Slot::Second, second)]
                .into_iter()
                .map(move |(slot, stats)| IndicatorValue {
                    indicator,
                    slot,
                    value: value(stats),
                })
        })
        .collect()
}

/// Groups keyed by indicator, one bar per slot inside each group.
#[derive(Debug, Clone)]
pub struct GroupedBars {
    indicators: Vec<&'static str>,
    groups: BandScale,
    slots: BandScale,
    y: LinearScale,
}

impl GroupedBars {
    /// Scales for the given values.
    #[must_use]
    pub fn new(values: &[IndicatorValue]) -> Self {
        let mut indicators: Vec<&'static str> = Vec::new();
        for value in values {
            if !indicators.contains(&value.indicator) {
                indicators.push(value.indicator);
            }
        }
        let max = values.iter().map(|v| v.value).fold(0.0, f64::max);
        let groups = BandScale::new(indicators.len(), (0.0, SIZE.width), GROUP_PADDING);
        Self {
            slots: BandScale::new(Slot::ALL.len(), (0.0, groups.bandwidth()), SLOT_PADDING),
            groups,
            indicators,
            y: LinearScale::new((0.0, max * HEADROOM), (SIZE.height, 0.0)),
        }
    }

    fn group_index(&self, indicator: &str) -> usize {
        self.indicators
            .iter()
            .position(|i| *i == indicator)
            .unwrap_or(0)
    }
}

impl PanelAdapter for GroupedBars {
    type Datum = IndicatorValue;
    type Key = (&'static str, Slot);
    type Visual = Rect;

    fn name(&self) -> &'static str {
        "employment comparison"
    }

    fn key(&self, datum: &IndicatorValue) -> Self::Key {
        (datum.indicator, datum.slot)
    }

    fn target(&self, datum: &IndicatorValue, _index: usize) -> Rect {
        let group = self.groups.position(self.group_index(datum.indicator));
        let y = self.y.scale(datum.value);
        Rect {
            x: group + self.slots.position(datum.slot.index()),
            y,
            width: self.slots.bandwidth(),
            height: SIZE.height - y,
            fill: slot_color(datum.slot),
            opacity: 0.85,
        }
    }

    fn neutral(&self, datum: &IndicatorValue, index: usize) -> Rect {
        self.target(datum, index).flattened(SIZE.height)
    }

    fn collapse(&self, current: &Rect) -> Rect {
        current.flattened(SIZE.height)
    }

    fn timing(&self, phase: Phase, _index: usize) -> Timing {
        match phase {
            Phase::Enter | Phase::Update => Timing::millis(600),
            Phase::Exit => Timing::millis(400),
        }
    }
}
