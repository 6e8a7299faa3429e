/// Admissible range `[min, max]` of ray parameters for a hit query.
///
/// `min` is a small positive epsilon that keeps a ray from hitting the
/// surface it starts on. `max` starts out at the far sentinel (or the
/// distance to a light for shadow rays) and only ever shrinks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Returns the same interval with `max` lowered to `t`.
    ///
    /// A `t` at or above the current `max` leaves the interval unchanged.
    pub fn shrink(&self, t: f32) -> Interval {
        Interval::new(self.min, self.max.min(t))
    }
}
