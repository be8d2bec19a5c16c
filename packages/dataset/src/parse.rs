//! Census table parsing.
//!
//! The table is delimited text with a header row. Identifier, region code,
//! and population columns are found by name; the display-name columns
//! fall back to fixed positions when their usual header is absent.

use city_compare_city_models::{City, Population};

use crate::DatasetError;

/// Header of the region-code column.
pub const REGION_CODE_COLUMN: &str = "REG";
/// Header of the commune-code column.
pub const ID_COLUMN: &str = "COM";
/// Header of the municipal population column.
pub const MUNICIPAL_COLUMN: &str = "PMUN";
/// Header of the counted-elsewhere population column.
pub const COUNTED_ELSEWHERE_COLUMN: &str = "PCAP";
/// Header of the total population column.
pub const TOTAL_COLUMN: &str = "PTOT";

/// Preferred header of the commune-name column.
const NAME_COLUMN: &str = "Commune";
/// Position of the commune-name column when its header differs.
const NAME_POSITION: usize = 7;
/// Preferred header of the region-name column.
const REGION_NAME_COLUMN: &str = "Région";
/// Position of the region-name column when its header differs.
const REGION_NAME_POSITION: usize = 1;

/// Column indexes resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Region code.
    pub region_code: usize,
    /// Region display name.
    pub region_name: usize,
    /// Commune code.
    pub id: usize,
    /// Commune name.
    pub name: usize,
    /// Municipal population.
    pub municipal: usize,
    /// Counted-elsewhere population.
    pub counted_elsewhere: usize,
    /// Total population.
    pub total: usize,
}

impl ColumnLayout {
    /// Resolves the layout from a header row.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::MissingColumn`] if a required header is
    /// absent and no positional fallback exists.
    pub fn detect(headers: &[String]) -> Result<Self, DatasetError> {
        let named = |name: &str| headers.iter().position(|h| h == name);
        let required = |name: &str| {
            named(name).ok_or_else(|| DatasetError::MissingColumn {
                name: name.to_string(),
            })
        };
        let fallback = |name: &str, position: usize| {
            named(name)
                .or_else(|| (position < headers.len()).then_some(position))
                .ok_or_else(|| DatasetError::MissingColumn {
                    name: format!("{name} (or column {})", position + 1),
                })
        };

        Ok(Self {
            region_code: required(REGION_CODE_COLUMN)?,
            region_name: fallback(REGION_NAME_COLUMN, REGION_NAME_POSITION)?,
            id: required(ID_COLUMN)?,
            name: fallback(NAME_COLUMN, NAME_POSITION)?,
            municipal: required(MUNICIPAL_COLUMN)?,
            counted_elsewhere: required(COUNTED_ELSEWHERE_COLUMN)?,
            total: required(TOTAL_COLUMN)?,
        })
    }
}

/// Coerces a population cell to a count.
///
/// Empty cells count as zero. Returns `None` for anything that is not a
/// finite, non-negative number.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn coerce_count(cell: &str) -> Option<u64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(0);
    }
    if let Ok(value) = cell.parse::<u64>() {
        return Some(value);
    }
    let value: f64 = cell.parse().ok()?;
    (value.is_finite() && value >= 0.0).then(|| value.round() as u64)
}

/// Parses every row of the census table.
///
/// Rows whose population cells are not numeric are skipped (and logged);
/// no population filtering happens here.
///
/// # Errors
///
/// Returns [`DatasetError`] if the CSV is malformed or a required column
/// is missing.
pub fn parse_cities(text: &str, delimiter: u8) -> Result<Vec<City>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_owned())
        .collect();

    let layout = ColumnLayout::detect(&headers)?;
    let mut cities = Vec::new();
    let mut skipped = 0_usize;

    for result in reader.records() {
        let record = result?;
        let cell = |i: usize| record.get(i).unwrap_or("").trim();

        let (Some(municipal), Some(counted_elsewhere), Some(total)) = (
            coerce_count(cell(layout.municipal)),
            coerce_count(cell(layout.counted_elsewhere)),
            coerce_count(cell(layout.total)),
        ) else {
            log::debug!("Skipping row {}: non-numeric population", cell(layout.id));
            skipped += 1;
            continue;
        };

        cities.push(City {
            id: cell(layout.id).to_owned(),
            name: cell(layout.name).to_owned(),
            region_code: cell(layout.region_code).to_owned(),
            region_name: cell(layout.region_name).to_owned(),
            population: Population {
                municipal,
                counted_elsewhere,
                total,
            },
            coordinates: None,
        });
    }

    log::info!(
        "Parsed {} rows from census table ({skipped} skipped)",
        cities.len()
    );
    Ok(cities)
}
