//! Top cities of a region as vertical bars.

use std::sync::Arc;

use city_compare_city_models::City;
use city_compare_diff::{PanelAdapter, Phase, Timing};

use super::{Rect, Size};
use crate::palette::RegionPalette;
use crate::scale::{BandScale, LinearScale};

/// Drawable area of the ranking chart.
pub const SIZE: Size = Size::inside(1040.0, 480.0, [30.0, 30.0, 120.0, 70.0]);

const PADDING: f64 = 0.25;
const OPACITY: f64 = 0.85;

/// Bars keyed by city id, height by municipal population, fill by region.
#[derive(Debug, Clone)]
pub struct RankedBars {
    x: BandScale,
    y: LinearScale,
    palette: RegionPalette,
}

impl RankedBars {
    /// Scales for the given ranking.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(ranking: &[Arc<City>], palette: RegionPalette) -> Self {
        let max = ranking
            .iter()
            .map(|c| c.population.municipal)
            .max()
            .unwrap_or(0);
        Self {
            x: BandScale::new(ranking.len(), (0.0, SIZE.width), PADDING),
            y: LinearScale::new((0.0, max as f64), (SIZE.height, 0.0)),
            palette,
        }
    }
}

impl PanelAdapter for RankedBars {
    type Datum = Arc<City>;
    type Key = String;
    type Visual = Rect;

    fn name(&self) -> &'static str {
        "ranking"
    }

    fn key(&self, city: &Arc<City>) -> String {
        city.id.clone()
    }

    #[allow(clippy::cast_precision_loss)]
    fn target(&self, city: &Arc<City>, index: usize) -> Rect {
        let y = self.y.scale(city.population.municipal as f64);
        Rect {
            x: self.x.position(index),
            y,
            width: self.x.bandwidth(),
            height: SIZE.height - y,
            fill: self.palette.color(&city.region_code),
            opacity: OPACITY,
        }
    }

    fn neutral(&self, city: &Arc<City>, index: usize) -> Rect {
        self.target(city, index).flattened(SIZE.height)
    }

    fn collapse(&self, current: &Rect) -> Rect {
        Rect {
            opacity: 0.0,
            ..current.flattened(SIZE.height)
        }
    }

    fn timing(&self, phase: Phase, index: usize) -> Timing {
        match phase {
            Phase::Enter => Timing::millis(600).staggered(40, index),
            Phase::Update => Timing::millis(600),
            Phase::Exit => Timing::millis(400),
        }
    }
}

#[cfg(test)]
mod tests {
    use city_compare_city_models::Region;
    use city_compare_diff::Panel;

    use super::*;
    use crate::ranking::{TOP_N, top_cities};
    use crate::test_fixtures::city;

    fn palette() -> RegionPalette {
        RegionPalette::new(&[
            Region {
                code: "11".to_string(),
                name: "Île-de-France".to_string(),
            },
            Region {
                code: "84".to_string(),
                name: "Auvergne-Rhône-Alpes".to_string(),
            },
        ])
    }

    fn region(code: &str, count: u64) -> Vec<Arc<City>> {
        (1..=count)
            .map(|i| {
                city(
                    &format!("{code}{i:03}"),
                    &format!("{code}-{i}"),
                    code,
                    20_000 + i * 1_000,
                )
            })
            .collect()
    }

    fn render(
        panel: &mut Panel<RankedBars>,
        cities: &[Arc<City>],
    ) -> city_compare_diff::Frame<String, Rect> {
        let ranking = top_cities(cities, TOP_N);
        let adapter = RankedBars::new(&ranking, palette());
        panel.render(&adapter, &ranking)
    }

    #[test]
    fn tallest_bar_fills_chart() {
        let mut panel = Panel::new();
        let frame = render(&mut panel, &region("84", 20));

        assert_eq!(frame.count(Phase::Enter), 15);
        let first = &frame.transitions[0];
        assert_eq!(first.key, "84020");
        assert!(first.to.y.abs() < 1e-9);
        assert!((first.to.height - SIZE.height).abs() < 1e-9);
        assert_eq!(first.to.fill, "#a855f7");
        assert!(first.from.height.abs() < 1e-9);
    }

    #[test]
    fn switching_region_exits_old_bars_and_enters_new() {
        let mut panel = Panel::new();
        render(&mut panel, &region("84", 20));
        let frame = render(&mut panel, &region("11", 5));

        assert_eq!(frame.count(Phase::Exit), 15);
        assert_eq!(frame.count(Phase::Enter), 5);
        assert_eq!(frame.count(Phase::Update), 0);
        assert!(
            frame
                .phase(Phase::Exit)
                .all(|t| t.to.height == 0.0 && t.to.opacity == 0.0)
        );
        assert_eq!(panel.len(), 5);
    }

    #[test]
    fn rerank_keeps_bar_bound_to_city() {
        let mut panel = Panel::new();
        let mut cities = region("84", 3);
        render(&mut panel, &cities);
        let smallest = panel.element(&"84001".to_string()).unwrap();

        Arc::make_mut(&mut cities[0]).population.municipal = 900_000;
        let frame = render(&mut panel, &cities);

        let moved = frame
            .transitions
            .iter()
            .find(|t| t.key == "84001")
            .unwrap();
        assert_eq!(moved.element, smallest);
        assert_eq!(moved.phase, Phase::Update);
        assert!(moved.to.x < moved.from.x, "bar moves to the front");
    }
}
