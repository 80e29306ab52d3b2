//! Axis-aligned rectangles in the mesh's planar (XY) coordinate system.
//!
//! An [`Extent`] is either *empty* (sentinel bounds `+∞/−∞`, so the first
//! [`Extent::include_point`] establishes real bounds) or satisfies
//! `x_min <= x_max && y_min <= y_max`. All tests are inclusive on every side.
//!
//! Coordinates must not be NaN: IEEE comparison rules make the results
//! deterministic but meaningless.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Self::empty()
    }
}

impl Extent {
    /// Extent covering nothing; any `include` establishes the first bound.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        }
    }

    #[inline]
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Square window of half-width `half_width` centred on `(x, y)`.
    #[inline]
    pub fn around(x: f64, y: f64, half_width: f64) -> Self {
        Self::new(x - half_width, x + half_width, y - half_width, y + half_width)
    }

    /// Smallest extent covering every `(x, y)` in `points`.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut extent = Self::empty();
        for (x, y) in points {
            extent.include_point(x, y);
        }
        extent
    }

    /// True until the first point or non-empty extent has been included.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }

    /// Grow to cover `(x, y)`. Never contracts.
    #[inline]
    pub fn include_point(&mut self, x: f64, y: f64) {
        if x < self.x_min {
            self.x_min = x;
        }
        if x > self.x_max {
            self.x_max = x;
        }
        if y < self.y_min {
            self.y_min = y;
        }
        if y > self.y_max {
            self.y_max = y;
        }
    }

    /// Grow to cover `other`. Never contracts.
    #[inline]
    pub fn include(&mut self, other: &Extent) {
        if other.x_min < self.x_min {
            self.x_min = other.x_min;
        }
        if other.x_max > self.x_max {
            self.x_max = other.x_max;
        }
        if other.y_min < self.y_min {
            self.y_min = other.y_min;
        }
        if other.y_max > self.y_max {
            self.y_max = other.y_max;
        }
    }

    /// Returns this extent enlarged by `margin` on all four sides.
    #[must_use]
    #[inline]
    pub fn grow(&self, margin: f64) -> Self {
        Self::new(
            self.x_min - margin,
            self.x_max + margin,
            self.y_min - margin,
            self.y_max + margin,
        )
    }

    /// Inclusive point containment.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
    }

    /// Inclusive interval overlap on both axes; touching edges overlap.
    #[inline]
    pub fn overlaps(&self, other: &Extent) -> bool {
        self.x_min <= other.x_max
            && self.x_max >= other.x_min
            && self.y_min <= other.y_max
            && self.y_max >= other.y_min
    }

    /// Centre point `(x_mid, y_mid)`.
    #[inline]
    pub fn midpoint(&self) -> (f64, f64) {
        (
            0.5 * (self.x_min + self.x_max),
            0.5 * (self.y_min + self.y_max),
        )
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}
