//! Spatial bounds of a level

use skirmish_core::{SceneConfig, Vec3};

/// Horizontal extent and ground height. Enemies read it; nothing mutates it during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub min_x: f32,
    pub max_x: f32,
    pub ground_y: f32,
}

impl Scene {
    pub fn new(min_x: f32, max_x: f32, ground_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            ground_y,
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.min_x, config.max_x, config.ground_y)
    }

    pub fn contains(&self, x: f32) -> bool {
        x >= self.min_x && x <= self.max_x
    }

    /// Pull a position back inside the horizontal bounds and above the ground
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(self.min_x, self.max_x),
            position.y.max(self.ground_y),
            position.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_to_bounds_and_ground() {
        let scene = Scene::new(-5.0, 5.0, 1.0);
        assert_eq!(
            scene.clamp(Vec3::new(7.0, -2.0, 3.0)),
            Vec3::new(5.0, 1.0, 3.0)
        );
        assert_eq!(
            scene.clamp(Vec3::new(-2.0, 4.0, 0.0)),
            Vec3::new(-2.0, 4.0, 0.0)
        );
    }

    #[test]
    fn from_config_uses_defaults() {
        let scene = Scene::from_config(&SceneConfig::default());
        assert!(scene.contains(0.0));
        assert!(scene.contains(100.0));
        assert!(!scene.contains(100.5));
    }
}
