//! Game clock with fixed-timestep accumulator

use std::time::Instant;

/// Longest frame the clock will accept; longer stalls are clamped
const MAX_FRAME_TIME: f64 = 0.25;

/// Tracks game time and hands out fixed simulation steps.
///
/// Interactive drivers call `tick()` once per frame (wall clock); headless
/// drivers call `advance(dt)` with a synthetic frame time so runs replay
/// identically.
#[derive(Debug)]
pub struct GameClock {
    /// Total elapsed game time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Fixed timestep interval (default: 1/60 second)
    pub fixed_timestep: f64,
    accumulator: f64,
    last_instant: Option<Instant>,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 60.0,
            accumulator: 0.0,
            last_instant: None,
        }
    }
}

impl GameClock {
    /// Create a new game clock with default 60Hz fixed timestep
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a game clock with a custom fixed rate in Hz
    pub fn with_fixed_timestep(hz: f64) -> Self {
        Self {
            fixed_timestep: 1.0 / hz,
            ..Self::default()
        }
    }

    /// Advance by wall-clock time since the previous call. The first call
    /// only records the starting instant.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = match self.last_instant.replace(now) {
            Some(previous) => now.duration_since(previous).as_secs_f64(),
            None => 0.0,
        };
        self.advance(elapsed);
    }

    /// Advance by an explicit frame time
    pub fn advance(&mut self, dt: f64) {
        if dt > MAX_FRAME_TIME {
            log::debug!("Frame of {:.3}s clamped to {}s", dt, MAX_FRAME_TIME);
        }
        self.delta_time = dt.clamp(0.0, MAX_FRAME_TIME);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Consume one fixed step if enough time has accumulated
    pub fn next_fixed_step(&mut self) -> Option<f64> {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            Some(self.fixed_timestep)
        } else {
            None
        }
    }

    /// Interpolation alpha for rendering between fixed steps
    pub fn interpolation_alpha(&self) -> f64 {
        self.accumulator / self.fixed_timestep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = GameClock::new();
        assert!((clock.fixed_timestep - 1.0 / 60.0).abs() < 1e-10);
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn test_custom_timestep() {
        let clock = GameClock::with_fixed_timestep(30.0);
        assert!((clock.fixed_timestep - 1.0 / 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = GameClock::new();
        clock.tick();
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn test_fixed_steps_from_accumulator() {
        let mut clock = GameClock::with_fixed_timestep(4.0);
        clock.advance(0.5);
        assert_eq!(clock.next_fixed_step(), Some(0.25));
        assert_eq!(clock.next_fixed_step(), Some(0.25));
        assert_eq!(clock.next_fixed_step(), None);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut clock = GameClock::new();
        clock.advance(3.0);
        assert_eq!(clock.delta_time, 0.25);
        assert_eq!(clock.total_time, 0.25);
    }

    #[test]
    fn test_interpolation_alpha() {
        let mut clock = GameClock::with_fixed_timestep(4.0);
        clock.advance(0.125);
        assert!((clock.interpolation_alpha() - 0.5).abs() < 1e-10);
    }
}
