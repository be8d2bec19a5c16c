#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Statistic bundle types produced by the stat generator.
//!
//! Every bundle is a pure function of one city. Percentage breakdowns are
//! grouped into [`BreakdownGroup`]s whose shares sum to 100; the last
//! share of each group is the remainder, never sampled on its own.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

/// Labels of the twelve months, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Economic sectors in an employment breakdown.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
)]
pub enum Sector {
    /// Farming and fishing.
    Agriculture,
    /// Manufacturing and energy.
    Industry,
    /// Building trades.
    Construction,
    /// Retail and wholesale trade.
    Commerce,
    /// Everything else; the remainder share.
    Services,
}

/// How a dwelling is occupied.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
)]
pub enum Occupancy {
    /// Main home of its occupants.
    #[strum(serialize = "Primary residence")]
    PrimaryResidence,
    /// Holiday or secondary home.
    #[strum(serialize = "Secondary residence")]
    SecondaryResidence,
    /// Unoccupied; the remainder share.
    Vacant,
}

/// Whether occupants own or rent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
)]
pub enum Tenure {
    /// Owner-occupied.
    Owner,
    /// Rented; the remainder share.
    Renter,
}

/// Building type of a dwelling.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
)]
pub enum DwellingType {
    /// Detached or terraced house.
    House,
    /// Flat in a collective building; the remainder share.
    Apartment,
}

/// One named percentage inside a [`BreakdownGroup`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    /// Component label (e.g. "Services").
    pub label: String,
    /// Percentage, rounded to one decimal.
    pub pct: f64,
}

impl Share {
    /// Creates a share from anything with a display label.
    #[must_use]
    pub fn new(label: impl AsRef<str>, pct: f64) -> Self {
        Self {
            label: label.as_ref().to_string(),
            pct,
        }
    }
}

/// A named set of shares constrained to sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownGroup {
    /// Group title (e.g. "Sectors").
    pub title: String,
    /// Shares in display order. The last one is the forced remainder.
    pub shares: Vec<Share>,
}

impl BreakdownGroup {
    /// Sum of all shares. Equal to 100 up to rounding.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.shares.iter().map(|s| s.pct).sum()
    }

    /// Looks up a share by label.
    #[must_use]
    pub fn share(&self, label: &str) -> Option<f64> {
        self.shares.iter().find(|s| s.label == label).map(|s| s.pct)
    }
}

/// Employment indicators for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentStats {
    /// Unemployment rate in percent, within `[4.0, 15.0]`.
    pub unemployment_rate: f64,
    /// Number of jobs located in the city.
    pub job_count: u64,
    /// Activity rate in percent, within `[66, 80)`.
    pub activity_rate: f64,
    /// Median monthly income in euros.
    pub median_income: u64,
    /// Jobs by [`Sector`]. Services is the remainder.
    pub sectors: BreakdownGroup,
}

/// Housing indicators for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingStats {
    /// Number of dwellings.
    pub dwelling_count: u64,
    /// Mean price per square metre in euros.
    pub price_per_m2: u64,
    /// Mean dwelling surface in square metres.
    pub mean_surface: u64,
    /// Share of social housing in percent.
    pub social_housing_pct: f64,
    /// Dwellings by [`Occupancy`].
    pub occupancy: BreakdownGroup,
    /// Dwellings by [`Tenure`].
    pub tenure: BreakdownGroup,
    /// Dwellings by [`DwellingType`].
    pub dwelling_type: BreakdownGroup,
}

impl HousingStats {
    /// The three breakdown groups, in display order.
    #[must_use]
    pub fn groups(&self) -> [&BreakdownGroup; 3] {
        [&self.dwelling_type, &self.tenure, &self.occupancy]
    }
}

/// A single value attached to a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyValue {
    /// Zero-based month index (0 = January).
    pub month: usize,
    /// Value for that month.
    pub value: f64,
}

impl MonthlyValue {
    /// Short month label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        MONTH_LABELS[self.month % MONTH_LABELS.len()]
    }
}

/// Reference climate curves for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateStats {
    /// Mean temperature per month, in °C.
    pub temperatures: Vec<MonthlyValue>,
    /// Precipitation per month, in mm.
    pub precipitation: Vec<MonthlyValue>,
}

/// One generated statistic bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StatBundle {
    /// Employment indicators.
    Employment(EmploymentStats),
    /// Housing indicators.
    Housing(HousingStats),
    /// Climate curves.
    Climate(ClimateStats),
}

/// All bundles for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityStats {
    /// Commune code the bundles were generated for.
    pub city_id: String,
    /// Employment bundle.
    pub employment: EmploymentStats,
    /// Housing bundle.
    pub housing: HousingStats,
    /// Climate bundle.
    pub climate: ClimateStats,
}

impl CityStats {
    /// Splits the aggregate back into its individual bundles.
    #[must_use]
    pub fn bundles(&self) -> [StatBundle; 3] {
        [
            StatBundle::Employment(self.employment.clone()),
            StatBundle::Housing(self.housing.clone()),
            StatBundle::Climate(self.climate.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn occupancy_labels_are_readable() {
        assert_eq!(Occupancy::PrimaryResidence.to_string(), "Primary residence");
        assert_eq!(Occupancy::Vacant.as_ref(), "Vacant");
    }

    #[test]
    fn sector_remainder_is_last() {
        assert_eq!(Sector::iter().last(), Some(Sector::Services));
        assert_eq!(Sector::iter().count(), 5);
    }

    #[test]
    fn group_total_and_lookup() {
        let group = BreakdownGroup {
            title: "Tenure".to_string(),
            shares: vec![Share::new(Tenure::Owner, 42.0), Share::new(Tenure::Renter, 58.0)],
        };
        assert!((group.total() - 100.0).abs() < f64::EPSILON);
        assert_eq!(group.share("Renter"), Some(58.0));
        assert_eq!(group.share("Nobody"), None);
    }

    #[test]
    fn month_labels_wrap() {
        let december = MonthlyValue {
            month: 11,
            value: 5.0,
        };
        assert_eq!(december.label(), "Dec");
    }
}
