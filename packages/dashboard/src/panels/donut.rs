//! Breakdown groups as donut charts.

use std::f64::consts::TAU;
use std::fmt;

use city_compare_diff::{PanelAdapter, Phase, Timing};
use city_compare_stats_models::{BreakdownGroup, CityStats, Share};

use crate::palette::donut_color;

/// Outer width of one donut.
pub const WIDTH: f64 = 450.0;
/// Outer height of one donut.
pub const HEIGHT: f64 = 320.0;
/// Outer radius of the ring, sized to the shorter side.
pub const RADIUS: f64 = HEIGHT / 2.0 - 40.0;

const INNER_RATIO: f64 = 0.52;
const LABEL_RATIO: f64 = 0.78;
/// Slices at or below this percentage get no label.
const LABEL_MIN_PCT: f64 = 8.0;

/// Which breakdown a donut shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DonutKind {
    /// Employment by sector.
    Sectors,
    /// Houses vs. apartments.
    DwellingType,
    /// Owners vs. renters.
    Tenure,
    /// Primary, secondary, vacant.
    Occupancy,
}

impl DonutKind {
    /// Every donut, in page order.
    pub const ALL: [Self; 4] = [Self::Sectors, Self::DwellingType, Self::Tenure, Self::Occupancy];

    /// The group this donut draws from a city's stats.
    #[must_use]
    pub const fn group(self, stats: &CityStats) -> &BreakdownGroup {
        match self {
            Self::Sectors => &stats.employment.sectors,
            Self::DwellingType => &stats.housing.dwelling_type,
            Self::Tenure => &stats.housing.tenure,
            Self::Occupancy => &stats.housing.occupancy,
        }
    }
}

impl fmt::Display for DonutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sectors => "sectors",
            Self::DwellingType => "dwelling type",
            Self::Tenure => "tenure",
            Self::Occupancy => "occupancy",
        })
    }
}

/// One ring segment, angles in radians clockwise from twelve o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    /// Start angle.
    pub start_angle: f64,
    /// End angle.
    pub end_angle: f64,
    /// Inner radius.
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
    /// Fill color.
    pub fill: &'static str,
    /// Label and its anchor, if the slice is wide enough.
    pub label: Option<(String, (f64, f64))>,
}

/// Slices keyed by component label, in group order.
#[derive(Debug, Clone)]
pub struct Donut {
    angles: Vec<(f64, f64)>,
}

impl Donut {
    /// Angles for the given shares. Negative shares draw as empty slices.
    #[must_use]
    pub fn new(shares: &[Share]) -> Self {
        let total: f64 = shares.iter().map(|s| s.pct.max(0.0)).sum();
        let mut start = 0.0;
        let angles = shares
            .iter()
            .map(|share| {
                let sweep = if total > 0.0 {
                    share.pct.max(0.0) / total * TAU
                } else {
                    0.0
                };
                let slice = (start, start + sweep);
                start += sweep;
                slice
            })
            .collect();
        Self { angles }
    }

    fn angles(&self, index: usize) -> (f64, f64) {
        self.angles.get(index).copied().unwrap_or((0.0, 0.0))
    }
}

/// Center of the label arc for a slice.
fn label_anchor(start: f64, end: f64) -> (f64, f64) {
    let middle = (start + end) / 2.0;
    let r = RADIUS * LABEL_RATIO;
    (r * middle.sin(), -r * middle.cos())
}

impl PanelAdapter for Donut {
    type Datum = Share;
    type Key = String;
    type Visual = Slice;

    fn name(&self) -> &'static str {
        "donut"
    }

    fn key(&self, share: &Share) -> String {
        share.label.clone()
    }

    fn target(&self, share: &Share, index: usize) -> Slice {
        let (start_angle, end_angle) = self.angles(index);
        Slice {
            start_angle,
            end_angle,
            inner_radius: RADIUS * INNER_RATIO,
            outer_radius: RADIUS,
            fill: donut_color(index),
            label: (share.pct > LABEL_MIN_PCT)
                .then(|| (share.label.clone(), label_anchor(start_angle, end_angle))),
        }
    }

    fn neutral(&self, share: &Share, index: usize) -> Slice {
        let target = self.target(share, index);
        Slice {
            end_angle: target.start_angle,
            label: None,
            ..target
        }
    }

    fn collapse(&self, current: &Slice) -> Slice {
        Slice {
            end_angle: current.start_angle,
            label: None,
            ..current.clone()
        }
    }

    fn timing(&self, phase: Phase, _index: usize) -> Timing {
        match phase {
            Phase::Enter | Phase::Update => Timing::millis(600),
            Phase::Exit => Timing::millis(400),
        }
    }
}

#[cfg(test)]
mod tests {
    use city_compare_diff::Panel;

    use super::*;

    fn shares(values: &[(&str, f64)]) -> Vec<Share> {
        values.iter().map(|(l, p)| Share::new(l, *p)).collect()
    }

    #[test]
    fn slices_cover_full_circle() {
        let data = shares(&[("A", 50.0), ("B", 30.0), ("C", 20.0)]);
        let donut = Donut::new(&data);
        let last = donut.target(&data[2], 2);
        assert!((last.end_angle - TAU).abs() < 1e-9);
        assert!((donut.target(&data[1], 1).start_angle - TAU * 0.5).abs() < 1e-9);
        assert!((RADIUS - 120.0).abs() < 1e-9);
    }

    #[test]
    fn small_slices_are_unlabelled() {
        let data = shares(&[("Big", 92.0), ("Small", 8.0)]);
        let donut = Donut::new(&data);
        assert!(donut.target(&data[0], 0).label.is_some());
        assert!(donut.target(&data[1], 1).label.is_none());
    }

    #[test]
    fn negative_share_draws_empty() {
        let data = shares(&[("A", 105.0), ("B", -5.0)]);
        let donut = Donut::new(&data);
        let b = donut.target(&data[1], 1);
        assert!((b.end_angle - b.start_angle).abs() < 1e-9);
    }

    #[test]
    fn new_city_updates_same_components() {
        let first = shares(&[("Owner", 40.0), ("Renter", 60.0)]);
        let second = shares(&[("Owner", 70.0), ("Renter", 30.0)]);

        let mut panel = Panel::new();
        panel.render(&Donut::new(&first), &first);
        let frame = panel.render(&Donut::new(&second), &second);

        assert_eq!(frame.count(Phase::Update), 2);
        let owner = &frame.transitions[0];
        assert!((owner.from.end_angle - TAU * 0.4).abs() < 1e-9);
        assert!((owner.to.end_angle - TAU * 0.7).abs() < 1e-9);
    }

    #[test]
    fn groups_are_picked_by_kind() {
        let stats = city_compare_stats::generate(&crate::test_fixtures::city(
            "75056", "Paris", "11", 2_145_906,
        ));
        assert_eq!(DonutKind::Sectors.group(&stats).shares.len(), 5);
        assert_eq!(DonutKind::Tenure.group(&stats).shares.len(), 2);
        assert_eq!(DonutKind::Occupancy.group(&stats).shares.len(), 3);
        assert_eq!(DonutKind::DwellingType.group(&stats).shares.len(), 2);
    }
}
