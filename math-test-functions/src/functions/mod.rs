//! Benchmark functions.

mod himmelblau;
mod rastrigin;
mod sphere;

pub use himmelblau::{HIMMELBLAU_MINIMA, Himmelblau};
pub use rastrigin::Rastrigin;
pub use sphere::Sphere;
