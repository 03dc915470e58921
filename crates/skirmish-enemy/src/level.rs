//! The world the enemy system runs over: player, scene, enemies, and pending triggers

use crate::context::EnemyContext;
use crate::entity::{Enemy, Player};
use crate::scene::Scene;
use crate::state::EnemyState;
use skirmish_core::{EntityId, Result, SkirmishError};
use skirmish_runtime::{EventBus, GameEvent};

#[derive(Debug)]
pub struct Level {
    pub player: Player,
    pub scene: Scene,
    pub events: EventBus,
    enemies: Vec<EnemyContext>,
}

impl Level {
    pub fn new(player: Player, scene: Scene) -> Self {
        Self {
            player,
            scene,
            events: EventBus::new(),
            enemies: Vec::new(),
        }
    }

    /// Add an enemy in `initial` state and return its id
    pub fn spawn(&mut self, enemy: Enemy, initial: EnemyState) -> Result<EntityId> {
        let ctx = EnemyContext::new(enemy, initial)?;
        let id = ctx.enemy().id;
        self.enemies.push(ctx);
        Ok(id)
    }

    /// Remove an enemy and its pending triggers, returning its context
    pub fn despawn(&mut self, id: EntityId) -> Result<EnemyContext> {
        let index = self
            .enemies
            .iter()
            .position(|ctx| ctx.enemy().id == id)
            .ok_or(SkirmishError::EntityNotFound(id.raw()))?;
        let dropped = self.events.discard_for(id);
        if dropped > 0 {
            log::debug!("Discarded {} pending events for enemy {}", dropped, id);
        }
        Ok(self.enemies.remove(index))
    }

    pub fn enemy(&self, id: EntityId) -> Result<&EnemyContext> {
        self.enemies
            .iter()
            .find(|ctx| ctx.enemy().id == id)
            .ok_or(SkirmishError::EntityNotFound(id.raw()))
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Result<&mut EnemyContext> {
        self.enemies
            .iter_mut()
            .find(|ctx| ctx.enemy().id == id)
            .ok_or(SkirmishError::EntityNotFound(id.raw()))
    }

    /// Enemies in spawn order
    pub fn enemies(&self) -> &[EnemyContext] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [EnemyContext] {
        &mut self.enemies
    }

    /// Apply a hit: flag the model, lower health, and raise the matching trigger.
    ///
    /// Hits on an enemy with no health left are ignored.
    pub fn damage(&mut self, id: EntityId, amount: f32) -> Result<()> {
        let ctx = self.enemy_mut(id)?;
        let enemy = ctx.enemy_mut();
        if !enemy.is_alive() {
            log::debug!("Ignoring hit on defeated enemy {}", id);
            return Ok(());
        }

        enemy.model.damaged = true;
        enemy.health -= amount;
        let event = if enemy.is_alive() {
            log::debug!("Enemy {} hit for {} ({} left)", id, amount, enemy.health);
            GameEvent::EnemyDamaged { enemy: id }
        } else {
            log::debug!("Enemy {} defeated", id);
            GameEvent::HealthDepleted { enemy: id }
        };
        self.events.push(event);
        Ok(())
    }

    /// Knock an enemy out
    pub fn stun(&mut self, id: EntityId) -> Result<()> {
        self.enemy(id)?;
        self.events.push(GameEvent::EnemyStunned { enemy: id });
        Ok(())
    }

    /// Get a knocked-out enemy back up
    pub fn revive(&mut self, id: EntityId) -> Result<()> {
        self.enemy(id)?;
        self.events.push(GameEvent::EnemyRevived { enemy: id });
        Ok(())
    }
}
