//! Seven-day forecast as max/min temperature lines per city.

use chrono::NaiveDate;
use city_compare_city_models::Slot;
use city_compare_diff::{PanelAdapter, Phase, Timing};
use city_compare_weather_models::WeatherSnapshot;

use super::{Point, Size};
use crate::palette::slot_color;
use crate::scale::{LinearScale, PointScale, extent};

/// Drawable area of the forecast chart.
pub const SIZE: Size = Size::inside(950.0, 320.0, [50.0, 40.0, 50.0, 50.0]);

const MARGIN: f64 = 2.0;

/// Which temperature line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Series {
    /// Daily maximum, solid.
    Max,
    /// Daily minimum, dashed.
    Min,
}

/// One line vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    /// Which city.
    pub slot: Slot,
    /// Which line.
    pub series: Series,
    /// Forecast day.
    pub date: NaiveDate,
    /// Temperature, °C.
    pub value: f64,
}

/// The four lines for a pair.
#[must_use]
pub fn forecast_points(first: &WeatherSnapshot, second: &WeatherSnapshot) -> Vec<ForecastPoint> {
    let mut points = Vec::new();
    for (slot, snapshot) in [(Slot::First, first), (Slot::Second, second)] {
        for series in [Series::Max, Series::Min] {
            points.extend(snapshot.daily.iter().map(|day| ForecastPoint {
                slot,
                series,
                date: day.date,
                value: match series {
                    Series::Max => day.temp_max,
                    Series::Min => day.temp_min,
                },
            }));
        }
    }
    points
}

/// Axis labels, e.g. `["Mon 19", "Tue 20", ...]`, for the first city's
/// days.
#[must_use]
pub fn day_labels(snapshot: &WeatherSnapshot) -> Vec<String> {
    snapshot.daily.iter().map(|day| day.label()).collect()
}

/// Points keyed by `(slot, series, date)`.
#[derive(Debug, Clone)]
pub struct ForecastLines {
    days: Vec<NaiveDate>,
    x: PointScale,
    y: LinearScale,
}

impl ForecastLines {
    /// Scales over the given points.
    #[must_use]
    pub fn new(points: &[ForecastPoint]) -> Self {
        let mut days: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
        days.sort_unstable();
        days.dedup();

        let (lo, hi) = extent(points.iter().map(|p| p.value)).unwrap_or((0.0, 0.0));
        Self {
            x: PointScale::new(days.len(), (0.0, SIZE.width)),
            days,
            y: LinearScale::new((lo - MARGIN, hi + MARGIN), (SIZE.height, 0.0)),
        }
    }

    fn x(&self, date: NaiveDate) -> f64 {
        let index = self.days.binary_search(&date).unwrap_or_else(|i| i);
        self.x.position(index)
    }
}

impl PanelAdapter for ForecastLines {
    type Datum = ForecastPoint;
    type Key = (Slot, Series, NaiveDate);
    type Visual = Point;

    fn name(&self) -> &'static str {
        "forecast"
    }

    fn key(&self, point: &ForecastPoint) -> Self::Key {
        (point.slot, point.series, point.date)
    }

    fn target(&self, point: &ForecastPoint, _index: usize) -> Point {
        Point {
            x: self.x(point.date),
            y: self.y.scale(point.value),
            stroke: slot_color(point.slot),
            dashed: point.series == Series::Min,
        }
    }

    fn neutral(&self, point: &ForecastPoint, index: usize) -> Point {
        Point {
            y: SIZE.height,
            ..self.target(point, index)
        }
    }

    fn collapse(&self, current: &Point) -> Point {
        Point {
            y: SIZE.height,
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
    use chrono::Datelike;
    use city_compare_diff::Panel;
    use city_compare_weather_models::{CurrentConditions, DailyForecast};

    use super::*;

    fn snapshot(start_day: u32, base: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            current: CurrentConditions {
                temperature: base,
                wind_speed: 12.0,
                condition_code: 1,
            },
            daily: (0..7)
                .map(|i| DailyForecast {
                    date: NaiveDate::from_ymd_opt(2026, 10, start_day + i).unwrap(),
                    temp_max: base + f64::from(i),
                    temp_min: base - 5.0,
                    precipitation: 0.0,
                    condition_code: 1,
                })
                .collect(),
        }
    }

    #[test]
    fn four_lines_of_seven_points() {
        let points = forecast_points(&snapshot(19, 15.0), &snapshot(19, 10.0));
        assert_eq!(points.len(), 28);

        let adapter = ForecastLines::new(&points);
        let hottest = points
            .iter()
            .find(|p| p.slot == Slot::First && p.series == Series::Max && p.date.day() == 25)
            .unwrap();
        let coldest = points
            .iter()
            .find(|p| p.slot == Slot::Second && p.series == Series::Min)
            .unwrap();

        // Values span 5..21 °C, padded to 3..23.
        let top = adapter.target(hottest, 0);
        assert!((top.x - SIZE.width).abs() < 1e-9);
        assert!((top.y - SIZE.height * 2.0 / 20.0).abs() < 1e-9);
        assert!(!top.dashed);
        let bottom = adapter.target(coldest, 0);
        assert!(bottom.dashed);
        assert!((bottom.y - SIZE.height * 18.0 / 20.0).abs() < 1e-9);
        assert_eq!(bottom.stroke, "#f59e0b");
    }

    #[test]
    fn next_day_forecast_shifts_keys() {
        let mut panel = Panel::new();
        let today = forecast_points(&snapshot(19, 15.0), &snapshot(19, 10.0));
        panel.render(&ForecastLines::new(&today), &today);

        let tomorrow = forecast_points(&snapshot(20, 15.0), &snapshot(20, 10.0));
        let frame = panel.render(&ForecastLines::new(&tomorrow), &tomorrow);

        assert_eq!(frame.count(Phase::Exit), 4, "the 19th drops off every line");
        assert_eq!(frame.count(Phase::Enter), 4, "the 26th appears on every line");
        assert_eq!(frame.count(Phase::Update), 24);
    }

    #[test]
    fn labels_follow_first_city() {
        let labels = day_labels(&snapshot(19, 15.0));
        assert_eq!(labels.first().map(String::as_str), Some("Mon 19"));
        assert_eq!(labels.len(), 7);
    }
}
