use math_particle_swarm::{PSOConfigBuilder, ParticleSwarm, SwarmPlotter, TrajectoryRecorder};
use math_test_functions::Himmelblau;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out = std::env::temp_dir().join("pso_himmelblau");

    let config = PSOConfigBuilder::new().n_particles(20).seed(7).build()?;
    let mut swarm = ParticleSwarm::over_domain(Himmelblau, config);
    swarm.initialize()?;

    let plotter = SwarmPlotter::new(swarm.cost_function(), swarm.bounds(), &out, 120, 120)?;
    let recorder = TrajectoryRecorder::new("himmelblau", &out);
    let mut observers = (plotter, recorder);

    let result = swarm.search_observed(40, &mut observers)?;
    println!("best: {result}");

    let (plotter, recorder) = &mut observers;
    for path in plotter.finalize()?.iter().chain(recorder.finalize()?.iter()) {
        println!("wrote {}", path.display());
    }
    Ok(())
}
