use crate::particle::Particle;

/// Index and value of the lowest personal best; the first one wins ties.
pub(crate) fn argmin_best(particles: &[Particle]) -> Option<(usize, f64)> {
    let first = particles.first()?;
    let mut best_i = 0usize;
    let mut best_v = first.best_value;
    for (i, p) in particles.iter().enumerate() {
        if p.best_value < best_v {
            best_v = p.best_value;
            best_i = i;
        }
    }
    Some((best_i, best_v))
}
