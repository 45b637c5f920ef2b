use math_particle_swarm::{FnObserver, PSOConfig, ParticleSwarm};
use math_test_functions::{BoundedFunction2D, Domain2D};
use std::f64::consts::{E, PI};

/// Ackley function on [-5, 5]²
struct Ackley;

impl BoundedFunction2D for Ackley {
    fn name(&self) -> &str {
        "ackley"
    }

    fn domain(&self) -> Domain2D {
        Domain2D::square(-5.0, 5.0)
    }

    fn value_unchecked(&self, x: f64, y: f64) -> f64 {
        let s = 0.5 * (x * x + y * y);
        let c = 0.5 * ((2.0 * PI * x).cos() + (2.0 * PI * y).cos());
        -20.0 * (-0.2 * s.sqrt()).exp() - c.exp() + 20.0 + E
    }

    fn global_minimum(&self) -> Option<([f64; 2], f64)> {
        Some(([0.0, 0.0], 0.0))
    }
}

fn main() {
    let mut cfg = PSOConfig::default();
    cfg.n_particles = 25;
    cfg.inertia = 0.7;
    cfg.cognitive = 1.5;
    cfg.social = 1.5;
    cfg.seed = Some(42);

    let mut swarm = ParticleSwarm::over_domain(Ackley, cfg);
    if let Err(e) = swarm.initialize() {
        eprintln!("initialization failed: {e}");
        return;
    }

    let mut progress = FnObserver(|s: &math_particle_swarm::SwarmSnapshot<'_>| {
        if s.iteration % 25 == 0 {
            eprintln!("iter {:4}  best_f={:.6e}", s.iteration, s.global_best_value);
        }
    });

    match swarm.search_observed(150, &mut progress) {
        Ok(result) => println!("best: {result}"),
        Err(e) => eprintln!("search failed: {e}"),
    }
}
