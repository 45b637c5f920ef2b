//! Swarm hyperparameters.

use crate::error::{PSOError, Result};
use crate::parallel_eval::ParallelConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration of a particle swarm.
///
/// All fields have defaults, so a JSON file only needs the values it
/// overrides:
///
/// ```json
/// { "n_particles": 30, "seed": 17 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PSOConfig {
    /// Population size
    pub n_particles: usize,
    /// Weight of the previous velocity
    pub inertia: f64,
    /// Pull toward the particle's own best position
    pub cognitive: f64,
    /// Pull toward the swarm's best position
    pub social: f64,
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Parallel sweep settings
    pub parallel: ParallelConfig,
}

impl Default for PSOConfig {
    fn default() -> Self {
        Self {
            n_particles: 10,
            inertia: 0.8,
            cognitive: 2.05,
            social: 2.05,
            seed: None,
            parallel: ParallelConfig::default(),
        }
    }
}

impl PSOConfig {
    /// Checks the population size and the velocity coefficients.
    ///
    /// # Errors
    ///
    /// `PSOError::InvalidPopulation` if `n_particles == 0`,
    /// `PSOError::InvalidCoefficient` if a coefficient is NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        if self.n_particles == 0 {
            return Err(PSOError::InvalidPopulation {
                n_particles: self.n_particles,
            });
        }
        for (name, value) in [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
        ] {
            if !value.is_finite() {
                return Err(PSOError::InvalidCoefficient { name, value });
            }
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, String> {
        let contents =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: PSOConfig =
            serde_json::from_str(&contents).map_err(|e| format!("Failed to parse JSON: {}", e))?;

        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, json).map_err(|e| format!("Failed to write config file: {}", e))?;

        Ok(())
    }
}

/// Fluent builder for [`PSOConfig`].
///
/// # Example
///
/// ```rust
/// use math_particle_swarm::PSOConfigBuilder;
///
/// let config = PSOConfigBuilder::new()
///     .n_particles(30)
///     .inertia(0.7)
///     .seed(17)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.n_particles, 30);
/// ```
pub struct PSOConfigBuilder {
    cfg: PSOConfig,
}

impl Default for PSOConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PSOConfigBuilder {
    /// Creates a builder holding the default configuration.
    pub fn new() -> Self {
        Self {
            cfg: PSOConfig::default(),
        }
    }
    /// Sets the population size.
    pub fn n_particles(mut self, v: usize) -> Self {
        self.cfg.n_particles = v;
        self
    }
    /// Sets the inertia weight.
    pub fn inertia(mut self, v: f64) -> Self {
        self.cfg.inertia = v;
        self
    }
    /// Sets the cognitive coefficient.
    pub fn cognitive(mut self, v: f64) -> Self {
        self.cfg.cognitive = v;
        self
    }
    /// Sets the social coefficient.
    pub fn social(mut self, v: f64) -> Self {
        self.cfg.social = v;
        self
    }
    /// Sets the RNG seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = Some(v);
        self
    }
    /// Sets the parallel sweep configuration.
    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.cfg.parallel = parallel;
        self
    }
    /// Enables/disables the parallel sweep.
    pub fn enable_parallel(mut self, enable: bool) -> Self {
        self.cfg.parallel.enabled = enable;
        self
    }
    /// Sets the number of rayon threads.
    pub fn parallel_threads(mut self, num_threads: usize) -> Self {
        self.cfg.parallel.num_threads = Some(num_threads);
        self
    }
    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// See [`PSOConfig::validate`].
    pub fn build(self) -> Result<PSOConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}
