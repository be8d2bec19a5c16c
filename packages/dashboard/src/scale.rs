//! Position scales used by the panel adapters.

/// Maps a continuous domain onto a continuous range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// A scale from `domain` onto `range`.
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value. A degenerate domain maps everything to the middle of
    /// the range.
    #[must_use]
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 || !span.is_finite() {
            0.5
        } else {
            (value - d0) / span
        };
        t.mul_add(r1 - r0, r0)
    }
}

/// Divides a range into `count` evenly spaced bands with padding.
///
/// The same padding ratio is used between bands and at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// `count` bands over `range` with `padding` in `[0, 1)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        let n = count as f64;
        let width = range.1 - range.0;
        let step = width / (n - padding + 2.0 * padding).max(1.0);
        let start = range.0 + (width - step * (n - padding)) * 0.5;
        Self {
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Left edge of band `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn position(&self, index: usize) -> f64 {
        (index as f64).mul_add(self.step, self.start)
    }

    /// Width of each band.
    #[must_use]
    pub const fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}

/// Places `count` points evenly across a range, first and last on the
/// edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointScale {
    start: f64,
    step: f64,
}

impl PointScale {
    /// `count` points over `range`. A single point sits in the middle.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(count: usize, range: (f64, f64)) -> Self {
        let gaps = count.saturating_sub(1) as f64;
        let width = range.1 - range.0;
        let step = width / gaps.max(1.0);
        Self {
            start: range.0 + (width - step * gaps) * 0.5,
            step,
        }
    }

    /// Position of point `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn position(&self, index: usize) -> f64 {
        (index as f64).mul_add(self.step, self.start)
    }
}

/// Smallest and largest finite value, or `None` if there are none.
#[must_use]
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn linear_maps_domain_onto_range() {
        let y = LinearScale::new((0.0, 100.0), (330.0, 0.0));
        assert!(close(y.scale(0.0), 330.0));
        assert!(close(y.scale(100.0), 0.0));
        assert!(close(y.scale(50.0), 165.0));
    }

    #[test]
    fn degenerate_domain_maps_to_middle() {
        let y = LinearScale::new((5.0, 5.0), (0.0, 200.0));
        assert!(close(y.scale(5.0), 100.0));
    }

    #[test]
    fn bands_fill_range_with_padding() {
        let x = BandScale::new(3, (0.0, 100.0), 0.0);
        assert!(close(x.bandwidth(), 100.0 / 3.0));
        assert!(close(x.position(0), 0.0));
        assert!(close(x.position(2), 200.0 / 3.0));

        let padded = BandScale::new(2, (0.0, 100.0), 0.25);
        let step = 100.0 / 2.25;
        assert!(close(padded.bandwidth(), step * 0.75));
        assert!(close(padded.position(0), step * 0.25));
        assert!(
            close(padded.position(1) + padded.bandwidth(), 100.0 - step * 0.25),
            "outer padding is symmetric"
        );
    }

    #[test]
    fn points_span_range() {
        let x = PointScale::new(7, (0.0, 600.0));
        assert!(close(x.position(0), 0.0));
        assert!(close(x.position(6), 600.0));
        assert!(close(x.position(3), 300.0));

        let single = PointScale::new(1, (0.0, 600.0));
        assert!(close(single.position(0), 300.0));
    }

    #[test]
    fn extent_skips_non_finite() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(extent(std::iter::empty()), None);
    }
}
