//! Recording wrapper for particle swarm searches

use crate::recorder::TrajectoryRecorder;
use crate::{ParticleSwarm, PSOConfig, SearchResult};
use directories::ProjectDirs;
use math_test_functions::BoundedFunction2D;
use std::path::PathBuf;

/// Get the records directory using the directories crate
pub fn get_records_dir() -> Result<PathBuf, String> {
    let proj_dirs = ProjectDirs::from("org", "spinorama", "math-audio")
        .ok_or("Failed to determine project directories")?;

    let records_dir = proj_dirs.cache_dir().join("records");

    std::fs::create_dir_all(&records_dir)
        .map_err(|e| format!("Failed to create records directory: {}", e))?;

    Ok(records_dir)
}

/// Run a particle swarm over the cost function's domain, recording every
/// particle state to CSV.
///
/// Returns the search result and the path of the first CSV block.
pub fn run_recorded_particle_swarm<F>(
    name: &str,
    cost: F,
    config: PSOConfig,
    n_iterations: usize,
) -> Result<(SearchResult, PathBuf), Box<dyn std::error::Error>>
where
    F: BoundedFunction2D,
{
    let records_dir =
        get_records_dir().map_err(|e| format!("Failed to get records directory: {}", e))?;

    let mut recorder = TrajectoryRecorder::new(name, &records_dir);
    let mut swarm = ParticleSwarm::over_domain(cost, config);
    swarm.initialize()?;
    let result = swarm.search_observed(n_iterations, &mut recorder)?;

    let csv_files = recorder.finalize()?;
    let csv_path = match csv_files.first() {
        Some(path) => path.clone(),
        None => records_dir.join(format!("{}.csv", name)),
    };

    Ok((result, csv_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PSOConfigBuilder;
    use math_test_functions::Sphere;

    #[test]
    fn test_run_recorded_basic() {
        let config = PSOConfigBuilder::new()
            .n_particles(20)
            .seed(42)
            .build()
            .expect("valid configuration");

        let (result, csv_path) =
            run_recorded_particle_swarm("test_sphere", Sphere, config, 100)
                .expect("recorded search should succeed");

        assert!(result.value < 1e-3, "Function value too high: {}", result.value);
        assert_eq!(result.iterations, 100);

        let csv = std::fs::read_to_string(&csv_path).expect("Failed to read CSV");
        let lines: Vec<&str> = csv.trim().lines().collect();
        // header + 20 particles x 101 snapshots
        assert_eq!(lines.len(), 1 + 20 * 101);
        assert!(lines[1].starts_with("0,0,"));
    }
}
