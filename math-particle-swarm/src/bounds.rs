//! Search bounds: validation, clamping and uniform sampling.

use crate::error::{PSOError, Result};
use crate::particle::Point2;
use math_test_functions::{Domain2D, Interval};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed search range `[lower, upper]` along one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub lower: f64,
    /// Upper bound (inclusive)
    pub upper: f64,
}

/// Search rectangle, one [`Bounds`] per dimension.
pub type SearchBounds = [Bounds; 2];

impl Bounds {
    /// Creates the range `[lower, upper]`.
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Checks that the range is finite and not inverted or degenerate.
    ///
    /// # Errors
    ///
    /// Returns `PSOError::InvalidBounds` unless `lower < upper` with both
    /// values finite.
    pub fn validate(&self, dimension: usize) -> Result<()> {
        if self.lower.is_finite() && self.upper.is_finite() && self.lower < self.upper {
            Ok(())
        } else {
            Err(PSOError::InvalidBounds {
                dimension,
                lower: self.lower,
                upper: self.upper,
            })
        }
    }

    /// Clamps `v` into the range, boundary values included.
    pub fn clamp(&self, v: f64) -> f64 {
        if v < self.lower {
            self.lower
        } else if v > self.upper {
            self.upper
        } else {
            v
        }
    }

    /// Inclusive membership test.
    pub fn contains(&self, v: f64) -> bool {
        self.lower <= v && v <= self.upper
    }

    /// Draws a value uniformly from `[lower, upper)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.random::<f64>();
        self.lower + u * (self.upper - self.lower)
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self::new(lower, upper)
    }
}

impl From<Interval> for Bounds {
    fn from(interval: Interval) -> Self {
        Self::new(interval.lower, interval.upper)
    }
}

impl From<Bounds> for Interval {
    fn from(bounds: Bounds) -> Self {
        Interval::new(bounds.lower, bounds.upper)
    }
}

/// Search rectangle covering a function's whole domain.
pub fn bounds_from_domain(domain: &Domain2D) -> SearchBounds {
    [domain.x.into(), domain.y.into()]
}

/// Domain covered by a search rectangle.
pub fn domain_from_bounds(bounds: &SearchBounds) -> Domain2D {
    Domain2D::new(bounds[0].into(), bounds[1].into())
}

/// Validates both dimensions of a search rectangle.
pub(crate) fn validate_bounds(bounds: &SearchBounds) -> Result<()> {
    for (dimension, b) in bounds.iter().enumerate() {
        b.validate(dimension)?;
    }
    Ok(())
}

/// Clamps every coordinate of `p` into its dimension's range.
pub fn clamp_point(bounds: &SearchBounds, p: Point2) -> Point2 {
    [bounds[0].clamp(p[0]), bounds[1].clamp(p[1])]
}

/// Returns `true` if `p` lies inside the search rectangle.
pub fn contains_point(bounds: &SearchBounds, p: Point2) -> bool {
    bounds[0].contains(p[0]) && bounds[1].contains(p[1])
}
