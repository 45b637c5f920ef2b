//! Sphere test function

use crate::{BoundedFunction2D, Domain2D};

/// Sphere function - 2D convex
/// Global minimum: f(x) = 0 at x = (0, 0)
/// Bounds: x_i in [-5, 5]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sphere;

impl BoundedFunction2D for Sphere {
    fn name(&self) -> &str {
        "sphere"
    }

    fn domain(&self) -> Domain2D {
        Domain2D::square(-5.0, 5.0)
    }

    fn value_unchecked(&self, x: f64, y: f64) -> f64 {
        x * x + y * y
    }

    fn global_minimum(&self) -> Option<([f64; 2], f64)> {
        Some(([0.0, 0.0], 0.0))
    }
}
