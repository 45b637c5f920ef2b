use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Parallel sweep configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Enable parallel proposal computation
    pub enabled: bool,
    /// Number of threads to use (None = use rayon default)
    pub num_threads: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            num_threads: None, // Use rayon's default (typically num_cpus)
        }
    }
}

impl ParallelConfig {
    /// Configures the global rayon pool if a thread count is set.
    ///
    /// Only the first call in a process can size the pool; later calls are
    /// no-ops.
    pub fn configure_global_pool(&self) {
        if let Some(n) = self.num_threads {
            // Ignore error if global pool already set
            let _ = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build_global();
        }
    }
}

/// Computes one proposal per particle index, in index order.
///
/// `propose` must only read shared state, so running it on the rayon pool
/// gives exactly the same output as the sequential loop.
///
/// # Arguments
/// * `n` - Number of particles
/// * `propose` - Computes the proposal of particle `i`
/// * `config` - Parallel configuration
pub fn propose_all<T, F>(n: usize, propose: F, config: &ParallelConfig) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    if !config.enabled || n < 4 {
        // Sequential for small swarms or when disabled
        return (0..n).map(propose).collect();
    }

    // Always use global thread pool (configured once in the swarm)
    (0..n).into_par_iter().map(propose).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_matches_sequential() {
        let f = |i: usize| {
            let x = i as f64 * 0.37 - 2.0;
            x * x - 10.0 * (2.0 * std::f64::consts::PI * x).cos()
        };

        let par = propose_all(
            64,
            f,
            &ParallelConfig {
                enabled: true,
                num_threads: Some(2),
            },
        );
        let seq = propose_all(
            64,
            f,
            &ParallelConfig {
                enabled: false,
                num_threads: None,
            },
        );

        assert_eq!(par.len(), 64);
        assert_eq!(par, seq);
    }

    #[test]
    fn test_order_is_preserved() {
        let out = propose_all(10, |i| i * 2, &ParallelConfig::default());
        assert_eq!(out, (0..10).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_small_swarm() {
        let out = propose_all(1, |i| i + 1, &ParallelConfig::default());
        assert_eq!(out, vec![1]);
    }
}
