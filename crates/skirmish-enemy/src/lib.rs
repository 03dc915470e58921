//! Skirmish Enemy - behavior state machine for side-scrolling enemies
//!
//! Each enemy is driven by an `EnemyContext` holding its current and previous
//! `EnemyState`. States are plain enum variants shared by every enemy: on entry
//! they pick the clip the enemy's `AnimatedModel` plays, and every tick they
//! steer the enemy relative to the `Player`.
//!
//! `EnemySystem` ties this to the game loop: `Perception` and `Level::damage`
//! raise `GameEvent`s, the system turns them into state changes, advances
//! every model, and mixes the resulting `SoundCue`s into `AudioCommand`s.

pub mod audio;
pub mod context;
pub mod entity;
pub mod level;
pub mod perception;
pub mod scene;
pub mod state;
pub mod system;

#[cfg(test)]
mod testing;

pub use audio::{AudioCommand, CueMixer, SoundCue};
pub use context::EnemyContext;
pub use entity::{AnimatedModel, Direction, Enemy, Player};
pub use level::Level;
pub use perception::{Perception, Zone};
pub use scene::Scene;
pub use state::EnemyState;
pub use system::EnemySystem;
