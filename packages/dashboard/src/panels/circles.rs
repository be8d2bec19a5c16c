//! Proportional circles comparing the three population figures.

use city_compare_city_models::{City, PopulationMetric, Slot};
use city_compare_diff::{PanelAdapter, Phase, Timing};

use super::Circle;
use crate::format::format_count;
use crate::palette::slot_color;
use crate::scale::LinearScale;

/// Width of the circle panel.
pub const WIDTH: f64 = 1040.0;
/// Height of the circle panel.
pub const HEIGHT: f64 = 320.0;

const CENTER_Y: f64 = 170.0;
const SLOT_OFFSET: f64 = 40.0;
const MIN_RADIUS: f64 = 8.0;
const MAX_RADIUS: f64 = 55.0;

/// One circle: a population figure of one city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationValue {
    /// Which figure.
    pub metric: PopulationMetric,
    /// Which city.
    pub slot: Slot,
    /// The figure.
    pub value: u64,
}

/// The six circles for a pair.
#[must_use]
pub fn population_values(first: &City, second: &City) -> Vec<PopulationValue> {
    PopulationMetric::ALL
        .iter()
        .flat_map(|&metric| {
            [(Slot::First, first), (Slot::Second, second)]
                .into_iter()
                .map(move |(slot, city)| PopulationValue {
                    metric,
                    slot,
                    value: city.population.metric(metric),
                })
        })
        .collect()
}

fn metric_index(metric: PopulationMetric) -> usize {
    PopulationMetric::ALL
        .iter()
        .position(|m| *m == metric)
        .unwrap_or(0)
}

/// Circles keyed by `(metric, slot)`, radius by value.
#[derive(Debug, Clone)]
pub struct Circles {
    radius: LinearScale,
}

impl Circles {
    /// Radius scale over the given values.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(values: &[PopulationValue]) -> Self {
        let max = values.iter().map(|v| v.value).max().unwrap_or(0);
        Self {
            radius: LinearScale::new((0.0, max as f64), (MIN_RADIUS, MAX_RADIUS)),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn center_x(metric: PopulationMetric, slot: Slot) -> f64 {
        let spacing = WIDTH / (PopulationMetric::ALL.len() + 1) as f64;
        let column = spacing * (metric_index(metric) + 1) as f64;
        match slot {
            Slot::First => column - SLOT_OFFSET,
            Slot::Second => column + SLOT_OFFSET,
        }
    }
}

impl PanelAdapter for Circles {
    type Datum = PopulationValue;
    type Key = (PopulationMetric, Slot);
    type Visual = Circle;

    fn name(&self) -> &'static str {
        "population circles"
    }

    fn key(&self, datum: &PopulationValue) -> Self::Key {
        (datum.metric, datum.slot)
    }

    #[allow(clippy::cast_precision_loss)]
    fn target(&self, datum: &PopulationValue, _index: usize) -> Circle {
        Circle {
            cx: Self::center_x(datum.metric, datum.slot),
            cy: CENTER_Y,
            r: self.radius.scale(datum.value as f64),
            fill: slot_color(datum.slot),
            label: format_count(datum.value),
        }
    }

    fn neutral(&self, datum: &PopulationValue, index: usize) -> Circle {
        Circle {
            r: 0.0,
            ..self.target(datum, index)
        }
    }

    fn collapse(&self, current: &Circle) -> Circle {
        Circle {
            r: 0.0,
            ..current.clone()
        }
    }

    fn timing(&self, phase: Phase, index: usize) -> Timing {
        match phase {
            Phase::Enter | Phase::Update => Timing::millis(700).staggered(100, index / 2),
            Phase::Exit => Timing::millis(400),
        }
    }
}

#[cfg(test)]
mod tests {
    use city_compare_diff::Panel;

    use super::*;
    use crate::test_fixtures::city;

    #[test]
    fn largest_value_gets_largest_radius() {
        let paris = city("75056", "Paris", "11", 2_145_906);
        let lyon = city("69123", "Lyon", "84", 522_969);
        let values = population_values(&paris, &lyon);
        assert_eq!(values.len(), 6);

        let adapter = Circles::new(&values);
        let total_paris = values
            .iter()
            .find(|v| v.metric == PopulationMetric::Total && v.slot == Slot::First)
            .unwrap();
        let circle = adapter.target(total_paris, 4);
        assert!((circle.r - MAX_RADIUS).abs() < 1e-9);
        assert_eq!(circle.fill, "#6366f1");
        assert!((circle.cx - (WIDTH / 4.0 * 3.0 - SLOT_OFFSET)).abs() < 1e-9);
    }

    #[test]
    fn stagger_by_metric_column() {
        let adapter = Circles::new(&[]);
        assert_eq!(adapter.timing(Phase::Enter, 0).delay.as_millis(), 0);
        assert_eq!(adapter.timing(Phase::Enter, 1).delay.as_millis(), 0);
        assert_eq!(adapter.timing(Phase::Enter, 2).delay.as_millis(), 100);
        assert_eq!(adapter.timing(Phase::Update, 5).delay.as_millis(), 200);
    }

    #[test]
    fn new_pair_keeps_circle_identity() {
        let a = city("75056", "Paris", "11", 2_145_906);
        let b = city("69123", "Lyon", "84", 522_969);
        let c = city("13055", "Marseille", "93", 873_076);

        let mut panel = Panel::new();
        let first = population_values(&a, &b);
        panel.render(&Circles::new(&first), &first);
        let id = panel.element(&(PopulationMetric::Municipal, Slot::First)).unwrap();

        let second = population_values(&c, &b);
        let frame = panel.render(&Circles::new(&second), &second);

        assert_eq!(frame.count(Phase::Update), 6);
        assert_eq!(
            panel.element(&(PopulationMetric::Municipal, Slot::First)),
            Some(id)
        );
    }
}
