//! Text views: city cards, KPI rows, the comparison summary, and the
//! visibility state of each dashboard section.

use city_compare_city_models::{City, PopulationMetric, Slot};
use city_compare_stats_models::{EmploymentStats, HousingStats};
use city_compare_weather_models::WeatherSnapshot;

use crate::format::{format_count, format_decimal};

/// Shown in the weather section when a join fails.
pub const WEATHER_UNAVAILABLE: &str = "Could not load weather data. Check your connection.";

/// A block of the dashboard that is shown or hidden as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    /// Summary text and population circles.
    Comparison,
    /// Employment KPIs, grouped bars and sector donuts.
    Employment,
    /// Housing KPIs and housing donuts.
    Housing,
    /// Current conditions and the forecast chart.
    Weather,
    /// Monthly climate chart.
    Climate,
}

impl Section {
    /// Every section that depends on a selected pair.
    pub const ALL: [Self; 5] = [
        Self::Comparison,
        Self::Employment,
        Self::Housing,
        Self::Weather,
        Self::Climate,
    ];
}

/// Visibility of a [`Section`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelStatus {
    /// Placeholder shown; no pair selected.
    Hidden,
    /// Waiting for external data.
    Loading,
    /// Rendered.
    Ready,
    /// Data could not be loaded; the message replaces the content.
    Degraded(String),
}

/// Contents of one city card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityCard {
    /// No city in this slot.
    Placeholder {
        /// Which card.
        slot: Slot,
        /// Prompt text.
        prompt: &'static str,
    },
    /// A selected city.
    Filled {
        /// Which card.
        slot: Slot,
        /// City name.
        name: String,
        /// Region display name.
        region: String,
        /// Label and formatted value for each population figure.
        population: Vec<(&'static str, String)>,
    },
}

impl CityCard {
    /// Builds the card for `slot`.
    #[must_use]
    pub fn new(slot: Slot, city: Option<&City>) -> Self {
        city.map_or_else(
            || Self::Placeholder {
                slot,
                prompt: match slot {
                    Slot::First => "Click a city…",
                    Slot::Second => "Click a second city…",
                },
            },
            |city| Self::Filled {
                slot,
                name: city.name.clone(),
                region: city.region_name.clone(),
                population: PopulationMetric::ALL
                    .iter()
                    .map(|&m| (m.label(), format_count(city.population.metric(m))))
                    .collect(),
            },
        )
    }

    /// Which card this is.
    #[must_use]
    pub const fn slot(&self) -> Slot {
        match self {
            Self::Placeholder { slot, .. } | Self::Filled { slot, .. } => *slot,
        }
    }
}

/// One KPI card: an indicator with a value for each city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kpi {
    /// Emoji icon.
    pub icon: &'static str,
    /// Indicator label.
    pub label: &'static str,
    /// Formatted value per slot.
    pub values: [String; 2],
}

impl Kpi {
    fn new(icon: &'static str, label: &'static str, first: String, second: String) -> Self {
        Self {
            icon,
            label,
            values: [first, second],
        }
    }
}

/// `"The more populous city is X. Gap: N inhabitants."`
///
/// On equal populations the second city is named.
#[must_use]
pub fn comparison_summary(first: &City, second: &City) -> String {
    let a = first.population.municipal;
    let b = second.population.municipal;
    let larger = if a > b { first } else { second };
    format!(
        "The more populous city is {}. Gap: {} inhabitants.",
        larger.name,
        format_count(a.abs_diff(b))
    )
}

/// Employment KPI row.
#[must_use]
pub fn employment_kpis(first: &EmploymentStats, second: &EmploymentStats) -> Vec<Kpi> {
    let pct = |v: f64| format!("{} %", format_decimal(v));
    let euros = |v: u64| format!("{} €", format_count(v));
    vec![
        Kpi::new(
            "📉",
            "Unemployment rate",
            pct(first.unemployment_rate),
            pct(second.unemployment_rate),
        ),
        Kpi::new(
            "👥",
            "Jobs",
            format_count(first.job_count),
            format_count(second.job_count),
        ),
        Kpi::new(
            "📊",
            "Activity rate",
            pct(first.activity_rate),
            pct(second.activity_rate),
        ),
        Kpi::new(
            "💰",
            "Median income (€/month)",
            euros(first.median_income),
            euros(second.median_income),
        ),
    ]
}

/// Housing KPI row.
#[must_use]
pub fn housing_kpis(first: &HousingStats, second: &HousingStats) -> Vec<Kpi> {
    vec![
        Kpi::new(
            "🏘️",
            "Dwellings",
            format_count(first.dwelling_count),
            format_count(second.dwelling_count),
        ),
        Kpi::new(
            "💶",
            "Price per m²",
            format!("{} €", format_count(first.price_per_m2)),
            format!("{} €", format_count(second.price_per_m2)),
        ),
        Kpi::new(
            "📐",
            "Mean surface",
            format!("{} m²", first.mean_surface),
            format!("{} m²", second.mean_surface),
        ),
        Kpi::new(
            "🏗️",
            "Social housing",
            format!("{} %", format_decimal(first.social_housing_pct)),
            format!("{} %", format_decimal(second.social_housing_pct)),
        ),
    ]
}

/// Current-conditions KPI row. The conditions icon is the first city's.
#[must_use]
pub fn weather_kpis(first: &WeatherSnapshot, second: &WeatherSnapshot) -> Vec<Kpi> {
    let a = first.current.condition();
    let b = second.current.condition();
    vec![
        Kpi::new(
            "🌡️",
            "Current temperature",
            format!("{} °C", format_decimal(first.current.temperature)),
            format!("{} °C", format_decimal(second.current.temperature)),
        ),
        Kpi::new(
            a.icon,
            "Conditions",
            a.description.to_string(),
            b.description.to_string(),
        ),
        Kpi::new(
            "💨",
            "Wind",
            format!("{} km/h", format_decimal(first.current.wind_speed)),
            format!("{} km/h", format_decimal(second.current.wind_speed)),
        ),
    ]
}
