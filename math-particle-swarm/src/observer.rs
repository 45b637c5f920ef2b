//! Passive consumers of swarm progress.
//!
//! An observer sees a read-only [`SwarmSnapshot`] after initialization and
//! after every sweep. It cannot change the search; failures on its side
//! (file I/O, rendering) stay inside the observer.

use crate::particle::{Particle, Point2};

/// Read-only view of the swarm between two sweeps.
#[derive(Debug, Clone, Copy)]
pub struct SwarmSnapshot<'a> {
    /// Sweeps completed since initialization (0 = initial population)
    pub iteration: usize,
    /// Every particle, in swarm order
    pub particles: &'a [Particle],
    /// Lowest cost observed so far
    pub global_best_value: f64,
    /// Where it was observed
    pub global_best_position: Point2,
}

impl SwarmSnapshot<'_> {
    /// Current `(x, y, cost)` of every particle.
    pub fn samples(&self) -> Vec<(f64, f64, f64)> {
        self.particles
            .iter()
            .map(|p| (p.position[0], p.position[1], p.value))
            .collect()
    }
}

/// Receives swarm snapshots during [`search_observed`].
///
/// [`search_observed`]: crate::ParticleSwarm::search_observed
pub trait SwarmObserver {
    /// Called with the initial population and after each sweep.
    fn on_iteration(&mut self, snapshot: &SwarmSnapshot<'_>);

    /// Called once when the search ends.
    fn on_finish(&mut self) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SwarmObserver for NoopObserver {
    fn on_iteration(&mut self, _snapshot: &SwarmSnapshot<'_>) {}
}

impl<O: SwarmObserver + ?Sized> SwarmObserver for &mut O {
    fn on_iteration(&mut self, snapshot: &SwarmSnapshot<'_>) {
        (**self).on_iteration(snapshot);
    }

    fn on_finish(&mut self) {
        (**self).on_finish();
    }
}

impl<O: SwarmObserver> SwarmObserver for Option<O> {
    fn on_iteration(&mut self, snapshot: &SwarmSnapshot<'_>) {
        if let Some(o) = self {
            o.on_iteration(snapshot);
        }
    }

    fn on_finish(&mut self) {
        if let Some(o) = self {
            o.on_finish();
        }
    }
}

impl<A: SwarmObserver, B: SwarmObserver> SwarmObserver for (A, B) {
    fn on_iteration(&mut self, snapshot: &SwarmSnapshot<'_>) {
        self.0.on_iteration(snapshot);
        self.1.on_iteration(snapshot);
    }

    fn on_finish(&mut self) {
        self.0.on_finish();
        self.1.on_finish();
    }
}

/// Adapts a closure into an observer.
///
/// ```rust
/// use math_particle_swarm::{FnObserver, SwarmSnapshot};
///
/// let mut history = Vec::new();
/// let observer = FnObserver(|s: &SwarmSnapshot<'_>| history.push(s.global_best_value));
/// # drop(observer);
/// ```
pub struct FnObserver<F>(pub F);

impl<F> SwarmObserver for FnObserver<F>
where
    F: FnMut(&SwarmSnapshot<'_>),
{
    fn on_iteration(&mut self, snapshot: &SwarmSnapshot<'_>) {
        (self.0)(snapshot);
    }
}
