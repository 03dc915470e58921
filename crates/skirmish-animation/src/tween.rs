//! Object-level transform tweens
//!
//! Interpolates a whole `Transform` (position, rotation, scale) between two
//! endpoints over a duration. Rotation is Euler degrees and is lerped
//! component-wise, unlike bone rotations which slerp.

use skirmish_core::Transform;

/// Linear interpolation of a position/rotation/scale triple over time.
///
/// There is no completion signal: callers that need one compare
/// `elapsed()` against `duration()` themselves.
#[derive(Debug, Clone)]
pub struct TransformTween {
    pub start: Transform,
    pub end: Transform,
    /// Seconds for one pass from `start` to `end`
    pub duration: f64,
    pub looping: bool,
    elapsed: f64,
    current: Transform,
}

impl TransformTween {
    pub fn new(start: Transform, end: Transform, duration: f64, looping: bool) -> Self {
        let mut tween = Self {
            start,
            end,
            duration,
            looping,
            elapsed: 0.0,
            current: start,
        };
        tween.recompute();
        tween
    }

    /// Accumulate `elapsed` seconds and recompute `current`
    pub fn update(&mut self, elapsed: f64) {
        self.elapsed += elapsed;
        self.recompute();
    }

    fn recompute(&mut self) {
        let progress = self.progress();
        self.current = self.start.lerp(&self.end, progress as f32);
    }

    /// Normalized progress: wrapped into [0, 1) when looping, clamped to [0, 1] otherwise
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let raw = self.elapsed / self.duration;
        if self.looping {
            if raw >= 1.0 {
                raw % 1.0
            } else {
                raw.max(0.0)
            }
        } else {
            raw.clamp(0.0, 1.0)
        }
    }

    pub fn current(&self) -> &Transform {
        &self.current
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Restart from `start`
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::Vec3;

    fn platform_bob(looping: bool) -> TransformTween {
        TransformTween::new(
            Transform::IDENTITY,
            Transform::from_position(Vec3::new(0.0, 4.0, 0.0))
                .with_rotation(Vec3::new(0.0, 180.0, 0.0))
                .with_scale(Vec3::new(2.0, 2.0, 2.0)),
            2.0,
            looping,
        )
    }

    #[test]
    fn starts_at_start() {
        let tween = platform_bob(false);
        assert_eq!(*tween.current(), Transform::IDENTITY);
    }

    #[test]
    fn halfway_interpolates_all_components() {
        let mut tween = platform_bob(false);
        tween.update(1.0);
        let t = tween.current();
        assert_eq!(t.position, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(t.rotation, Vec3::new(0.0, 90.0, 0.0));
        assert_eq!(t.scale, Vec3::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn clamps_when_not_looping() {
        let mut tween = platform_bob(false);
        tween.update(5.0);
        assert_eq!(tween.progress(), 1.0);
        assert_eq!(tween.current().position, Vec3::new(0.0, 4.0, 0.0));
        // Elapsed keeps counting so callers can detect completion
        assert_eq!(tween.elapsed(), 5.0);
    }

    #[test]
    fn wraps_when_looping() {
        let mut tween = platform_bob(true);
        tween.update(2.5);
        assert_eq!(tween.progress(), 0.25);
        assert_eq!(tween.current().position, Vec3::new(0.0, 1.0, 0.0));

        tween.update(1.5);
        assert_eq!(tween.progress(), 0.0);
        assert_eq!(tween.current().position, Vec3::ZERO);
    }

    #[test]
    fn zero_duration_snaps_to_end() {
        let mut tween = platform_bob(false);
        tween.duration = 0.0;
        tween.update(0.0);
        assert_eq!(tween.current().scale, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn reset_returns_to_start() {
        let mut tween = platform_bob(true);
        tween.update(1.0);
        tween.reset();
        assert_eq!(tween.elapsed(), 0.0);
        assert_eq!(*tween.current(), Transform::IDENTITY);
    }
}
