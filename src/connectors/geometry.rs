//! Shared geometry helpers for connector families.

use crate::kicad::Point;

/// Axis-aligned body outline (mm, Y pointing down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyEdges {
    /// Minimum X.
    pub left: f64,
    /// Maximum X.
    pub right: f64,
    /// Minimum Y.
    pub top: f64,
    /// Maximum Y.
    pub bottom: f64,
}

impl BodyEdges {
    /// Returns the body width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Returns the body height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Returns the body centre.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Returns the closed outline, clockwise from the top-left corner.
    #[must_use]
    pub fn outline(&self) -> [Point; 5] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
            Point::new(self.left, self.top),
        ]
    }

    /// Returns the edges grown by `offset` on every side.
    #[must_use]
    pub fn expanded(&self, offset: f64) -> Self {
        Self {
            left: self.left - offset,
            right: self.right + offset,
            top: self.top - offset,
            bottom: self.bottom + offset,
        }
    }

    /// Returns the edges moved outward onto the nearest `grid` multiple.
    #[must_use]
    pub fn snapped_outward(&self, grid: f64) -> Self {
        if grid.abs() < f64::EPSILON {
            return *self;
        }
        Self {
            left: snap(self.left, grid, f64::floor),
            right: snap(self.right, grid, f64::ceil),
            top: snap(self.top, grid, f64::floor),
            bottom: snap(self.bottom, grid, f64::ceil),
        }
    }
}

// Values already on the grid stay put despite float noise.
fn snap(value: f64, grid: f64, round: fn(f64) -> f64) -> f64 {
    let steps = value / grid;
    let nearest = steps.round();
    if (steps - nearest).abs() < 1e-6 {
        nearest * grid
    } else {
        round(steps) * grid
    }
}

/// Rounds `value` to the nearest multiple of `base`, ties to even.
///
/// A `base` of zero returns the value unchanged.
#[must_use]
pub fn round_to_base(value: f64, base: f64) -> f64 {
    if base.abs() < f64::EPSILON {
        return value;
    }
    (value / base).round_ties_even() * base
}
