//! Particle swarm optimization over bounded 2-D cost functions.
//!
//! A swarm of particles moves through a search rectangle. Each particle is
//! pulled toward the best point it has seen itself and toward the best point
//! the whole swarm has seen, while keeping part of its previous velocity.
//!
//! # Features
//!
//! - Synchronized sweeps with an explicit barrier: every particle sees the
//!   same global best during a sweep
//! - Reproducible runs from a seed, identical with or without rayon
//! - Domain-checked cost functions from `math-test-functions`
//! - Observers for CSV trajectories and animated plotly contour plots
//!
//! # Example
//!
//! ```rust
//! use math_particle_swarm::{ParticleSwarm, PSOConfigBuilder};
//! use math_test_functions::Rastrigin;
//!
//! let config = PSOConfigBuilder::new()
//!     .n_particles(30)
//!     .seed(17)
//!     .build()
//!     .expect("invalid config");
//!
//! let mut swarm = ParticleSwarm::over_domain(Rastrigin::default(), config);
//! swarm.initialize().expect("initialization should succeed");
//! let result = swarm.search(200).expect("search should succeed");
//!
//! assert!(result.value < 1.0);
//! ```
#![warn(missing_docs)]

pub mod error;
pub use error::{PSOError, Result};

/// Particle state and personal-best bookkeeping.
pub mod particle;
pub use particle::{Particle, Point2};

/// Search bounds: validation, clamping and sampling.
pub mod bounds;
pub use bounds::{Bounds, SearchBounds, bounds_from_domain, clamp_point, contains_point};

/// Swarm configuration and its builder.
pub mod config;
pub use config::{PSOConfig, PSOConfigBuilder};

/// Sequential or rayon-parallel per-particle updates.
pub mod parallel_eval;
pub use parallel_eval::ParallelConfig;

mod argmin;

/// The swarm controller.
pub mod swarm;
pub use swarm::{ParticleSwarm, SearchResult, particle_swarm};

/// Observer trait, snapshots and combinators.
pub mod observer;
pub use observer::{FnObserver, NoopObserver, SwarmObserver, SwarmSnapshot};

/// CSV trajectory recording.
pub mod recorder;
pub use recorder::{TrajectoryRecorder, TrajectoryRow};

/// Plotly contour animation of a search.
pub mod plot;
pub use plot::SwarmPlotter;

/// Recording wrapper writing into the per-user cache directory.
pub mod run_recorded;
pub use run_recorded::run_recorded_particle_swarm;
