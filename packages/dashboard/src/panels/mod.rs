//! Panel adapters.
//!
//! Each submodule turns one kind of comparison data into keyed elements for
//! a [`city_compare_diff::Panel`]. Adapters are rebuilt for every render
//! because their scales depend on the data being drawn.

pub mod circles;
pub mod climate;
pub mod donut;
pub mod forecast;
pub mod grouped;
pub mod ranked;

/// A rectangle (bar).
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Fill color.
    pub fill: &'static str,
    /// Fill opacity.
    pub opacity: f64,
}

impl Rect {
    /// The same bar flattened onto `baseline`.
    #[must_use]
    pub fn flattened(&self, baseline: f64) -> Self {
        Self {
            y: baseline,
            height: 0.0,
            ..self.clone()
        }
    }
}

/// A circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// Center x.
    pub cx: f64,
    /// Center y.
    pub cy: f64,
    /// Radius.
    pub r: f64,
    /// Fill color.
    pub fill: &'static str,
    /// Value printed under the circle.
    pub label: String,
}

/// A vertex of a line series.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// x position.
    pub x: f64,
    /// y position.
    pub y: f64,
    /// Stroke color of the series.
    pub stroke: &'static str,
    /// Whether the series is drawn dashed.
    pub dashed: bool,
}

/// Panel width and height inside its margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    /// Drawable width.
    pub width: f64,
    /// Drawable height.
    pub height: f64,
}

impl Size {
    /// Drawable area of an `outer_width` × `outer_height` panel with
    /// margins `[top, right, bottom, left]`.
    #[must_use]
    pub const fn inside(outer_width: f64, outer_height: f64, margins: [f64; 4]) -> Self {
        let [top, right, bottom, left] = margins;
        Self {
            width: outer_width - left - right,
            height: outer_height - top - bottom,
        }
    }
}
