//! The particle swarm controller.

use crate::argmin::argmin_best;
use crate::bounds::{Bounds, SearchBounds, bounds_from_domain, validate_bounds};
use crate::config::PSOConfig;
use crate::error::{PSOError, Result};
use crate::observer::{NoopObserver, SwarmObserver, SwarmSnapshot};
use crate::parallel_eval::propose_all;
use crate::particle::{Particle, Point2};
use log::{debug, info};
use math_test_functions::{BoundedFunction2D, DomainError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::time::Instant;

/// Outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Lowest cost found
    pub value: f64,
    /// Where it was found
    pub position: Point2,
    /// Sweeps completed since initialization
    pub iterations: usize,
    /// Cost evaluations since initialization, initial population included
    pub evaluations: usize,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "f({:.6}, {:.6}) = {:.6e} after {} iterations ({} evaluations)",
            self.position[0], self.position[1], self.value, self.iterations, self.evaluations
        )
    }
}

/// Everything that exists only once the swarm is initialized.
struct SwarmState {
    particles: Vec<Particle>,
    global_best_value: f64,
    global_best_position: Point2,
    iteration: usize,
    evaluations: usize,
    rng: StdRng,
}

/// Random factors of one particle for one sweep.
struct SweepDraws {
    cognitive: Point2,
    social: Point2,
}

/// Candidate state of one particle, not yet committed.
struct Proposal {
    position: Point2,
    velocity: Point2,
    value: f64,
}

/// Particle swarm minimizer over a bounded 2-D cost function.
///
/// Use [`ParticleSwarm::new`] or [`ParticleSwarm::over_domain`], then
/// [`initialize`](Self::initialize) and [`search`](Self::search) (or
/// [`step`](Self::step) for manual control).
///
/// Each sweep is split in four phases so that the result does not depend on
/// the thread count:
/// 1. all random factors are drawn in particle order from the swarm RNG;
/// 2. every particle computes its new velocity, position and cost against
///    the global best as it was before the sweep;
/// 3. proposals are committed, or none is if any cost evaluation failed;
/// 4. the global best is recomputed from the personal bests.
pub struct ParticleSwarm<F: BoundedFunction2D> {
    cost: F,
    bounds: SearchBounds,
    config: PSOConfig,
    state: Option<SwarmState>,
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => {
            let mut thread_rng = rand::rng();
            StdRng::from_rng(&mut thread_rng)
        }
    }
}

impl<F: BoundedFunction2D> ParticleSwarm<F> {
    /// Creates an uninitialized swarm searching `x_bounds` × `y_bounds`.
    ///
    /// Nothing is validated here; see [`initialize`](Self::initialize).
    pub fn new(cost: F, x_bounds: Bounds, y_bounds: Bounds, config: PSOConfig) -> Self {
        Self {
            cost,
            bounds: [x_bounds, y_bounds],
            config,
            state: None,
        }
    }

    /// Creates an uninitialized swarm searching the cost function's whole domain.
    pub fn over_domain(cost: F, config: PSOConfig) -> Self {
        let bounds = bounds_from_domain(&cost.domain());
        Self {
            cost,
            bounds,
            config,
            state: None,
        }
    }

    /// Places the particles at random and computes the first global best.
    ///
    /// Calling it again discards the current population and starts over from
    /// `config.seed`, so a seeded swarm always restarts from the same
    /// population.
    ///
    /// # Errors
    ///
    /// Configuration errors for an empty swarm, non-finite coefficients or
    /// invalid bounds; `PSOError::Domain` if the search bounds reach outside
    /// the cost function's domain. The previous state is kept on error.
    pub fn initialize(&mut self) -> Result<()> {
        self.config.validate()?;
        validate_bounds(&self.bounds)?;
        self.config.parallel.configure_global_pool();

        let n = self.config.n_particles;
        let mut rng = seeded_rng(self.config.seed);
        let mut particles = Vec::with_capacity(n);
        for _ in 0..n {
            let px = self.bounds[0].sample(&mut rng);
            let py = self.bounds[1].sample(&mut rng);
            let vx = self.bounds[0].sample(&mut rng);
            let vy = self.bounds[1].sample(&mut rng);
            let value = self.cost.evaluate(px, py)?;
            particles.push(Particle::new([px, py], [vx, vy], value));
        }

        let (best_i, best_v) =
            argmin_best(&particles).ok_or(PSOError::InvalidPopulation { n_particles: n })?;
        let global_best_position = particles[best_i].best_position;

        info!(
            "PSO init: {} on [{}, {}] x [{}, {}], particles={}, w={:.3}, c1={:.3}, c2={:.3}, best={:.6e}",
            self.cost.name(),
            self.bounds[0].lower,
            self.bounds[0].upper,
            self.bounds[1].lower,
            self.bounds[1].upper,
            n,
            self.config.inertia,
            self.config.cognitive,
            self.config.social,
            best_v
        );

        self.state = Some(SwarmState {
            particles,
            global_best_value: best_v,
            global_best_position,
            iteration: 0,
            evaluations: n,
            rng,
        });
        Ok(())
    }

    /// Performs one synchronized sweep over all particles.
    ///
    /// # Errors
    ///
    /// `PSOError::NotInitialized` before [`initialize`](Self::initialize);
    /// `PSOError::Domain` if a clamped position was still rejected by the
    /// cost function. In that case the swarm, RNG included, is unchanged.
    pub fn step(&mut self) -> Result<()> {
        let Self {
            cost,
            bounds,
            config,
            state,
        } = self;
        let (cost, bounds, config) = (&*cost, &*bounds, &*config);
        let state = state.as_mut().ok_or(PSOError::NotInitialized)?;
        let n = state.particles.len();

        let mut rng = state.rng.clone();
        let draws: Vec<SweepDraws> = (0..n)
            .map(|_| {
                let mut d = SweepDraws {
                    cognitive: [0.0; 2],
                    social: [0.0; 2],
                };
                for k in 0..2 {
                    d.cognitive[k] = rng.random::<f64>();
                    d.social[k] = rng.random::<f64>();
                }
                d
            })
            .collect();

        let gbest = state.global_best_position;
        let particles = &state.particles;
        let (w, c1, c2) = (config.inertia, config.cognitive, config.social);
        let proposals = propose_all(
            n,
            |i| -> std::result::Result<Proposal, DomainError> {
                let p = &particles[i];
                let r = &draws[i];
                let mut velocity = [0.0; 2];
                let mut position = [0.0; 2];
                for k in 0..2 {
                    velocity[k] = w * p.velocity[k]
                        + c1 * r.cognitive[k] * (p.best_position[k] - p.position[k])
                        + c2 * r.social[k] * (gbest[k] - p.position[k]);
                    position[k] = bounds[k].clamp(p.position[k] + velocity[k]);
                }
                let value = cost.evaluate(position[0], position[1])?;
                Ok(Proposal {
                    position,
                    velocity,
                    value,
                })
            },
            &config.parallel,
        );
        let proposals = proposals
            .into_iter()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for (p, prop) in state.particles.iter_mut().zip(proposals) {
            p.observe(prop.position, prop.velocity, prop.value);
        }
        state.rng = rng;
        state.iteration += 1;
        state.evaluations += n;

        if let Some((i, v)) = argmin_best(&state.particles)
            && v < state.global_best_value
        {
            state.global_best_value = v;
            state.global_best_position = state.particles[i].best_position;
        }

        debug!(
            "PSO iter {:4}  best={:.6e} at ({:.6}, {:.6})",
            state.iteration,
            state.global_best_value,
            state.global_best_position[0],
            state.global_best_position[1]
        );
        Ok(())
    }

    /// Runs exactly `n_iterations` sweeps and returns the global best.
    ///
    /// `search(0)` returns the best of the initial population.
    ///
    /// # Errors
    ///
    /// See [`step`](Self::step).
    pub fn search(&mut self, n_iterations: usize) -> Result<SearchResult> {
        self.search_observed(n_iterations, &mut NoopObserver)
    }

    /// Like [`search`](Self::search), reporting progress to `observer`.
    ///
    /// The observer sees the current swarm before the first sweep and after
    /// every sweep, then `on_finish` once, even if a sweep failed.
    pub fn search_observed<O>(
        &mut self,
        n_iterations: usize,
        observer: &mut O,
    ) -> Result<SearchResult>
    where
        O: SwarmObserver + ?Sized,
    {
        observer.on_iteration(&self.snapshot()?);

        let t0 = Instant::now();
        let outcome = (0..n_iterations).try_for_each(|_| -> Result<()> {
            self.step()?;
            observer.on_iteration(&self.snapshot()?);
            Ok(())
        });
        observer.on_finish();
        outcome?;

        let result = self.result()?;
        info!(
            "PSO done: {} in {:.3} ms",
            result,
            t0.elapsed().as_secs_f64() * 1e3
        );
        Ok(result)
    }

    /// Current global best as a [`SearchResult`].
    pub fn result(&self) -> Result<SearchResult> {
        let state = self.state()?;
        Ok(SearchResult {
            value: state.global_best_value,
            position: state.global_best_position,
            iterations: state.iteration,
            evaluations: state.evaluations,
        })
    }

    fn state(&self) -> Result<&SwarmState> {
        self.state.as_ref().ok_or(PSOError::NotInitialized)
    }

    /// The particles, in creation order.
    pub fn particles(&self) -> Result<&[Particle]> {
        Ok(&self.state()?.particles)
    }

    /// Lowest cost observed so far and its position.
    pub fn global_best(&self) -> Result<(f64, Point2)> {
        let state = self.state()?;
        Ok((state.global_best_value, state.global_best_position))
    }

    /// Sweeps since initialization (0 when uninitialized).
    pub fn iteration(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.iteration)
    }

    /// Cost evaluations since initialization (0 when uninitialized).
    pub fn evaluations(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.evaluations)
    }

    /// Whether [`initialize`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// The swarm configuration.
    pub fn config(&self) -> &PSOConfig {
        &self.config
    }

    /// The search rectangle.
    pub fn bounds(&self) -> &SearchBounds {
        &self.bounds
    }

    /// The cost function.
    pub fn cost_function(&self) -> &F {
        &self.cost
    }

    /// Read-only view for observers.
    pub fn snapshot(&self) -> Result<SwarmSnapshot<'_>> {
        let state = self.state()?;
        Ok(SwarmSnapshot {
            iteration: state.iteration,
            particles: &state.particles,
            global_best_value: state.global_best_value,
            global_best_position: state.global_best_position,
        })
    }
}

/// Initializes a swarm and runs `n_iterations` sweeps.
///
/// # Example
///
/// ```rust
/// use math_particle_swarm::{Bounds, PSOConfigBuilder, particle_swarm};
/// use math_test_functions::Sphere;
///
/// let config = PSOConfigBuilder::new()
///     .n_particles(20)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
/// let result = particle_swarm(
///     Sphere,
///     Bounds::new(-5.0, 5.0),
///     Bounds::new(-5.0, 5.0),
///     config,
///     100,
/// )
/// .expect("search should succeed");
/// assert!(result.value < 1e-3);
/// ```
pub fn particle_swarm<F: BoundedFunction2D>(
    cost: F,
    x_bounds: Bounds,
    y_bounds: Bounds,
    config: PSOConfig,
    n_iterations: usize,
) -> Result<SearchResult> {
    let mut swarm = ParticleSwarm::new(cost, x_bounds, y_bounds, config);
    swarm.initialize()?;
    swarm.search(n_iterations)
}
