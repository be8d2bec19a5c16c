//! Per-region base unemployment rates.
//!
//! Codes follow the 2016 French administrative regions. Rates are a
//! simplified 2023 snapshot and only seed the synthetic figures.

/// Base rate used when a region code is unknown or missing.
pub const DEFAULT_BASE_UNEMPLOYMENT: f64 = 8.0;

/// All region codes with a known base rate.
pub const KNOWN_REGIONS: &[&str] = &[
    "11", "24", "27", "28", "32", "44", "52", "53", "75", "76", "84", "93", "94",
];

/// Returns the base unemployment rate (percent) for a region code.
///
/// Falls back to [`DEFAULT_BASE_UNEMPLOYMENT`] for anything unknown.
#[must_use]
pub fn base_unemployment(region_code: &str) -> f64 {
    match region_code.trim() {
        "11" | "75" => 7.8,
        "24" => 7.2,
        "27" => 6.9,
        "28" => 7.5,
        "32" => 9.8,
        "44" => 7.6,
        "52" => 6.1,
        "53" => 6.5,
        "76" => 10.1,
        "84" => 7.0,
        "93" => 10.5,
        "94" => 8.2,
        _ => DEFAULT_BASE_UNEMPLOYMENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_region_count() {
        assert_eq!(KNOWN_REGIONS.len(), 13);
    }

    #[test]
    fn known_regions_have_their_own_rate() {
        for code in KNOWN_REGIONS {
            let rate = base_unemployment(code);
            assert!(
                (4.0..=15.0).contains(&rate),
                "region {code} rate {rate} out of range"
            );
        }
        assert!((base_unemployment("93") - 10.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_region_falls_back() {
        assert!((base_unemployment("99") - DEFAULT_BASE_UNEMPLOYMENT).abs() < f64::EPSILON);
        assert!((base_unemployment("") - DEFAULT_BASE_UNEMPLOYMENT).abs() < f64::EPSILON);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!((base_unemployment(" 84 ") - 7.0).abs() < f64::EPSILON);
    }
}
