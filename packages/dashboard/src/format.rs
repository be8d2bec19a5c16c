//! Number formatting for labels and KPI cards.

/// Whole number with comma thousands separators: `2145906` → `"2,145,906"`.
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One decimal place: `7.25` → `"7.3"`.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    format!("{value:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(522_969), "522,969");
        assert_eq!(format_count(2_145_906), "2,145,906");
    }

    #[test]
    fn one_decimal() {
        assert_eq!(format_decimal(12.0), "12.0");
        assert_eq!(format_decimal(-3.44), "-3.4");
    }
}
