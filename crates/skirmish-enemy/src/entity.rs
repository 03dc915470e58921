//! Enemy and player entities

use crate::scene::Scene;
use skirmish_animation::{AnimationPlayer, SkinningData};
use skirmish_core::{EnemyConfig, EntityId, Result, Vec2, Vec3};
use std::fmt;
use std::sync::Arc;

/// Horizontal facing of a side-scrolling character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Animation control handle carried by every enemy.
///
/// `time_speed` scales the frame delta before it reaches the player, so a
/// state can slow a clip down or speed it up without touching the clip data.
#[derive(Debug, Clone)]
pub struct AnimatedModel {
    pub time_speed: f64,
    pub animation: AnimationPlayer,
    /// Set when a hit lands, cleared once the hit reaction finishes
    pub damaged: bool,
}

impl AnimatedModel {
    pub fn new(skinning: Arc<SkinningData>) -> Self {
        Self {
            time_speed: 1.0,
            animation: AnimationPlayer::new(skinning),
            damaged: false,
        }
    }

    /// Advance the active clip by `dt` scaled by `time_speed`
    pub fn advance(&mut self, dt: f64) -> Result<()> {
        self.animation.update(dt * self.time_speed)
    }
}

/// An enemy's physical and animation state. Behavior lives in `EnemyContext`.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub position: Vec3,
    /// Current velocity in units per second
    pub speed: Vec2,
    pub max_speed: Vec2,
    /// Euler angles in degrees
    pub rotation: Vec3,
    direction: Direction,
    last_direction: Direction,
    pub health: f32,
    pub model: AnimatedModel,
}

impl Enemy {
    pub fn new(position: Vec3, max_speed: Vec2, health: f32, skinning: Arc<SkinningData>) -> Self {
        Self {
            id: EntityId::new(),
            position,
            speed: Vec2::ZERO,
            max_speed,
            rotation: Vec3::ZERO,
            direction: Direction::default(),
            last_direction: Direction::default(),
            health,
            model: AnimatedModel::new(skinning),
        }
    }

    /// Spawn an enemy with the shared tuning from config
    pub fn from_config(config: &EnemyConfig, position: Vec3, skinning: Arc<SkinningData>) -> Self {
        let [max_x, max_y] = config.max_speed;
        Self::new(position, Vec2::new(max_x, max_y), config.health, skinning)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Facing before the most recent `face` call
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    /// Turn to `direction`, remembering the previous facing
    pub fn face(&mut self, direction: Direction) {
        self.last_direction = self.direction;
        self.direction = direction;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Step the model's clip and integrate velocity, keeping the enemy inside `scene`
    pub fn advance(&mut self, dt: f64, scene: &Scene) -> Result<()> {
        self.model.advance(dt)?;

        let step = dt as f32;
        let moved = Vec3::new(
            self.position.x + self.speed.x * step,
            self.position.y + self.speed.y * step,
            self.position.z,
        );
        self.position = scene.clamp(moved);
        Ok(())
    }
}

/// The player as seen by enemies: a read-only target
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Player {
    pub position: Vec3,
    pub speed: Vec2,
}

impl Player {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            speed: Vec2::ZERO,
        }
    }

    /// Move by the current speed, keeping the player inside `scene`
    pub fn advance(&mut self, dt: f64, scene: &Scene) {
        let step = dt as f32;
        let moved = Vec3::new(
            self.position.x + self.speed.x * step,
            self.position.y + self.speed.y * step,
            self.position.z,
        );
        self.position = scene.clamp(moved);
    }
}
