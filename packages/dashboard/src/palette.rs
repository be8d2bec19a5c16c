//! Colors.

use city_compare_city_models::{Region, Slot};

/// Qualitative palette cycled over regions.
pub const REGION_PALETTE: [&str; 18] = [
    "#6366f1", "#a855f7", "#ec4899", "#f43f5e", "#f59e0b", "#22c55e", "#06b6d4", "#3b82f6",
    "#8b5cf6", "#14b8a6", "#e879f9", "#fb923c", "#34d399", "#818cf8", "#fbbf24", "#f87171",
    "#2dd4bf", "#c084fc",
];

/// Donut slice colors, by component position.
pub const DONUT_PALETTE: [&str; 6] = [
    "#6366f1", "#a855f7", "#ec4899", "#f59e0b", "#22c55e", "#06b6d4",
];

/// First-slot color.
pub const FIRST_SLOT_COLOR: &str = "#6366f1";
/// Second-slot color.
pub const SECOND_SLOT_COLOR: &str = "#f59e0b";

/// Color that marks a slot in every panel.
#[must_use]
pub const fn slot_color(slot: Slot) -> &'static str {
    match slot {
        Slot::First => FIRST_SLOT_COLOR,
        Slot::Second => SECOND_SLOT_COLOR,
    }
}

/// Color of the `index`-th donut slice.
#[must_use]
pub const fn donut_color(index: usize) -> &'static str {
    DONUT_PALETTE[index % DONUT_PALETTE.len()]
}

/// Ordinal mapping from region code to color.
///
/// Colors follow each region's position in the sorted region list, so
/// changing the list changes the colors.
#[derive(Debug, Clone, Default)]
pub struct RegionPalette {
    domain: Vec<String>,
}

impl RegionPalette {
    /// Builds the mapping over the given regions, in order.
    #[must_use]
    pub fn new(regions: &[Region]) -> Self {
        Self {
            domain: regions.iter().map(|r| r.code.clone()).collect(),
        }
    }

    /// Color of a region. Codes outside the domain get the color the next
    /// new region would get.
    #[must_use]
    pub fn color(&self, region_code: &str) -> &'static str {
        let index = self
            .domain
            .iter()
            .position(|code| code == region_code)
            .unwrap_or(self.domain.len());
        REGION_PALETTE[index % REGION_PALETTE.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions(codes: &[&str]) -> Vec<Region> {
        codes
            .iter()
            .map(|code| Region {
                code: (*code).to_string(),
                name: format!("Region {code}"),
            })
            .collect()
    }

    #[test]
    fn colors_follow_domain_position() {
        let palette = RegionPalette::new(&regions(&["11", "24", "84"]));
        assert_eq!(palette.color("11"), "#6366f1");
        assert_eq!(palette.color("24"), "#a855f7");
        assert_eq!(palette.color("84"), "#ec4899");
        assert_eq!(palette.color("93"), "#f43f5e");
    }

    #[test]
    fn palette_cycles() {
        let codes: Vec<String> = (0..20).map(|i| format!("{i:02}")).collect();
        let refs: Vec<&str> = codes.iter().map(String::as_str).collect();
        let palette = RegionPalette::new(&regions(&refs));
        assert_eq!(palette.color("18"), palette.color("00"));
        assert_eq!(palette.color("19"), palette.color("01"));
    }

    #[test]
    fn domain_changes_shift_colors() {
        let before = RegionPalette::new(&regions(&["11", "84"]));
        let after = RegionPalette::new(&regions(&["84"]));
        assert_ne!(before.color("84"), after.color("84"));
    }

    #[test]
    fn slot_and_donut_colors() {
        assert_eq!(slot_color(Slot::First), "#6366f1");
        assert_eq!(slot_color(Slot::Second), "#f59e0b");
        assert_eq!(donut_color(6), donut_color(0));
    }
}
