//! Error type returned when a function is evaluated outside of its domain.

use thiserror::Error;

/// Errors raised by [`BoundedFunction2D`](crate::BoundedFunction2D) evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// The point lies outside the function's rectangular domain.
    #[error("point ({x}, {y}) is outside the domain [{x_lower}, {x_upper}] x [{y_lower}, {y_upper}]")]
    OutOfDomain {
        /// First coordinate of the rejected point
        x: f64,
        /// Second coordinate of the rejected point
        y: f64,
        /// Lower bound of the first coordinate
        x_lower: f64,
        /// Upper bound of the first coordinate
        x_upper: f64,
        /// Lower bound of the second coordinate
        y_lower: f64,
        /// Upper bound of the second coordinate
        y_upper: f64,
    },

    /// The coordinate arrays of a vectorized evaluation differ in shape.
    #[error("coordinate shape mismatch: x has shape {x_shape:?}, y has shape {y_shape:?}")]
    ShapeMismatch {
        /// Shape of the x array
        x_shape: Vec<usize>,
        /// Shape of the y array
        y_shape: Vec<usize>,
    },
}

impl DomainError {
    /// Returns `true` if a point fell outside the domain.
    pub fn is_out_of_domain(&self) -> bool {
        matches!(self, DomainError::OutOfDomain { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::OutOfDomain {
            x: -5.13,
            y: 0.0,
            x_lower: -5.12,
            x_upper: 5.12,
            y_lower: -5.12,
            y_upper: 5.12,
        };
        assert_eq!(
            err.to_string(),
            "point (-5.13, 0) is outside the domain [-5.12, 5.12] x [-5.12, 5.12]"
        );
        assert!(err.is_out_of_domain());
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = DomainError::ShapeMismatch {
            x_shape: vec![2, 3],
            y_shape: vec![3, 2],
        };
        assert_eq!(
            err.to_string(),
            "coordinate shape mismatch: x has shape [2, 3], y has shape [3, 2]"
        );
        assert!(!err.is_out_of_domain());
    }
}
