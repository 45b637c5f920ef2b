//! Himmelblau test function

use crate::{BoundedFunction2D, Domain2D};

/// Locations of the four global minima of [`Himmelblau`], all with value 0.
pub const HIMMELBLAU_MINIMA: [[f64; 2]; 4] = [
    [3.0, 2.0],
    [-2.805118, 3.131312],
    [-3.779310, -3.283186],
    [3.584428, -1.848126],
];

/// Himmelblau function - 2D multimodal
/// Global minima: f(x) = 0 at x = (3, 2), (-2.805118, 3.131312), (-3.779310, -3.283186), (3.584428, -1.848126)
/// Bounds: x_i in [-5, 5]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Himmelblau;

impl BoundedFunction2D for Himmelblau {
    fn name(&self) -> &str {
        "himmelblau"
    }

    fn domain(&self) -> Domain2D {
        Domain2D::square(-5.0, 5.0)
    }

    fn value_unchecked(&self, x: f64, y: f64) -> f64 {
        (x * x + y - 11.0).powi(2) + (x + y * y - 7.0).powi(2)
    }

    fn global_minimum(&self) -> Option<([f64; 2], f64)> {
        Some((HIMMELBLAU_MINIMA[0], 0.0))
    }
}
