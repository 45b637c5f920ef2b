//! Error types for the particle swarm optimizer.
//!
//! Configuration problems, lifecycle misuse and cost-function domain
//! violations are kept apart so callers can tell a bad setup from a bug.

use math_test_functions::DomainError;
use thiserror::Error;

/// Errors that can occur while setting up or running a particle swarm.
#[derive(Debug, Error)]
pub enum PSOError {
    /// The swarm needs at least one particle.
    #[error("population size ({n_particles}) must be >= 1")]
    InvalidPopulation {
        /// The invalid population size
        n_particles: usize,
    },

    /// A search bound is inverted, degenerate or not finite.
    #[error("invalid bounds for dimension {dimension}: lower ({lower}) must be < upper ({upper}) and both finite")]
    InvalidBounds {
        /// Index of the offending dimension (0 = x, 1 = y)
        dimension: usize,
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// A velocity-update coefficient is not finite.
    #[error("invalid {name} coefficient: {value} (must be finite)")]
    InvalidCoefficient {
        /// Which coefficient (inertia, cognitive, social)
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// `step` or `search` was called before `initialize`.
    #[error("swarm is not initialized: call initialize() before step() or search()")]
    NotInitialized,

    /// The cost function rejected a point: boundary enforcement failed.
    #[error("cost function rejected a swarm position: {0}")]
    Domain(#[from] DomainError),
}

/// A specialized `Result` type for swarm operations.
pub type Result<T> = std::result::Result<T, PSOError>;

impl PSOError {
    /// Returns `true` for configuration errors.
    ///
    /// This includes `InvalidPopulation`, `InvalidBounds` and
    /// `InvalidCoefficient`.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PSOError::InvalidPopulation { .. }
                | PSOError::InvalidBounds { .. }
                | PSOError::InvalidCoefficient { .. }
        )
    }

    /// Returns `true` if the swarm was used before initialization.
    pub fn is_state_error(&self) -> bool {
        matches!(self, PSOError::NotInitialized)
    }

    /// Returns `true` if the cost function refused a position.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, PSOError::Domain(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PSOError::InvalidBounds {
            dimension: 1,
            lower: 3.0,
            upper: -3.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid bounds for dimension 1: lower (3) must be < upper (-3) and both finite"
        );
        assert_eq!(
            PSOError::InvalidPopulation { n_particles: 0 }.to_string(),
            "population size (0) must be >= 1"
        );
    }

    #[test]
    fn test_is_config_error() {
        let config_err = PSOError::InvalidCoefficient {
            name: "inertia",
            value: f64::NAN,
        };
        assert!(config_err.is_config_error());
        assert!(!PSOError::NotInitialized.is_config_error());
    }

    #[test]
    fn test_domain_error_converts() {
        let domain = DomainError::OutOfDomain {
            x: 6.0,
            y: 0.0,
            x_lower: -5.12,
            x_upper: 5.12,
            y_lower: -5.12,
            y_upper: 5.12,
        };
        let err: PSOError = domain.into();
        assert!(err.is_domain_error());
        assert!(!err.is_config_error());
        assert!(!err.is_state_error());
    }
}
