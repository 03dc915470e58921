//! Runtime system trait

use skirmish_core::Result;

/// A system that can be ticked by the game loop
///
/// Fixed update runs at a constant rate (AI, movement), while update runs
/// once per frame with the variable frame delta.
pub trait RuntimeSystem {
    /// The world state this system reads and mutates
    type World;

    /// Called once when the system is first registered
    fn initialize(&mut self, world: &mut Self::World) -> Result<()>;

    /// Called at a fixed rate (e.g. 60Hz) for deterministic simulation
    fn fixed_update(&mut self, world: &mut Self::World, dt: f64) -> Result<()>;

    /// Called once per frame for variable-rate logic
    fn update(&mut self, world: &mut Self::World, dt: f64) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
