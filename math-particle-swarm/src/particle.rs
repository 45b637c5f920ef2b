//! Particle state.

/// A point (or a velocity) in the plane.
pub type Point2 = [f64; 2];

/// One candidate solution of the swarm.
///
/// Holds the current state and the best state this particle has ever seen.
/// `value` caches the cost at `position` so observers never re-evaluate the
/// cost function.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current position, always inside the search bounds
    pub position: Point2,
    /// Current velocity, never clamped
    pub velocity: Point2,
    /// Cost at the current position
    pub value: f64,
    /// Position of the lowest cost observed by this particle
    pub best_position: Point2,
    /// Lowest cost observed by this particle
    pub best_value: f64,
}

impl Particle {
    /// Creates a particle whose personal best is its starting point.
    pub fn new(position: Point2, velocity: Point2, value: f64) -> Self {
        Self {
            position,
            velocity,
            value,
            best_position: position,
            best_value: value,
        }
    }

    /// Moves the particle and updates its personal best on strict improvement.
    ///
    /// Returns `true` if the personal best changed.
    pub fn observe(&mut self, position: Point2, velocity: Point2, value: f64) -> bool {
        self.position = position;
        self.velocity = velocity;
        self.value = value;
        if value < self.best_value {
            self.best_position = position;
            self.best_value = value;
            true
        } else {
            false
        }
    }
}
