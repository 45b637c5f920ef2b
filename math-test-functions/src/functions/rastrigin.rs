//! Rastrigin test function

use crate::{BoundedFunction2D, Domain2D};
use std::f64::consts::PI;

/// Rastrigin function - 2D highly multimodal
/// f(x, y) = 2A + (x^2 - A cos(2 pi x)) + (y^2 - A cos(2 pi y))
/// Global minimum: f(x) = 0 at x = (0, 0)
/// Bounds: x_i in [-5.12, 5.12]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rastrigin {
    /// Amplitude of the cosine modulation (10 in the usual definition)
    pub a: f64,
}

impl Default for Rastrigin {
    fn default() -> Self {
        Self { a: 10.0 }
    }
}

impl BoundedFunction2D for Rastrigin {
    fn name(&self) -> &str {
        "rastrigin"
    }

    fn domain(&self) -> Domain2D {
        Domain2D::square(-5.12, 5.12)
    }

    fn value_unchecked(&self, x: f64, y: f64) -> f64 {
        let a = self.a;
        let term = |v: f64| v * v - a * (2.0 * PI * v).cos();
        2.0 * a + term(x) + term(y)
    }

    fn global_minimum(&self) -> Option<([f64; 2], f64)> {
        Some(([0.0, 0.0], 0.0))
    }
}
