//! Skirmish Core - Foundational types shared by every Skirmish crate
//!
//! This crate provides:
//! - `EntityId` - Stable identifiers for enemies and the player
//! - `Vec2`, `Vec3`, `Transform`, `Mat4` - Spatial types
//! - `GameConfig` - Layered TOML configuration
//! - Error types and Result alias

mod config;
mod error;
mod id;
mod types;

pub use config::{AudioConfig, EnemyConfig, GameConfig, SceneConfig, SimulationConfig};
pub use error::{Result, SkirmishError};
pub use id::EntityId;
pub use types::{mat4_mul, Mat4, Transform, Vec2, Vec3, MAT4_IDENTITY};
