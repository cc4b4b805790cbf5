use crate::constants::TIME_SCALE;

/// Converts wall-clock timestamps into the `u_time` value fed to shaders.
///
/// The epoch is fixed for the lifetime of a session; the clock is never
/// rewound. Speed changes take effect on the whole elapsed span, so moving the
/// speed slider rescales visual time instead of continuing from the last value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    start_epoch: f64,
    speed: f32,
}

impl FrameClock {
    pub fn new(start_epoch: f64, speed: f32) -> Self {
        Self { start_epoch, speed }
    }

    pub fn start_epoch(&self) -> f64 {
        self.start_epoch
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Negative speeds are allowed and run visual time backwards.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.start_epoch
    }

    /// Simulation time for a frame rendered at `now`.
    pub fn tick(&self, now: f64) -> f64 {
        self.elapsed(now) * self.speed as f64 * TIME_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_at_epoch() {
        let clock = FrameClock::new(42.0, 3.0);
        assert_eq!(clock.tick(42.0), 0.0);
    }

    #[test]
    fn negative_speed_runs_backwards() {
        let clock = FrameClock::new(0.0, -1.0);
        assert!(clock.tick(10.0) < clock.tick(5.0));
    }
}
