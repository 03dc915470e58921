//! Game events raised by perception, combat, and scripts

use skirmish_core::EntityId;

/// An external trigger aimed at one enemy.
///
/// Perception and combat code raise these; the enemy system drains them once
/// per fixed step and turns each into a state change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The player entered the enemy's detection range
    PlayerDetected { enemy: EntityId },
    /// The player is close enough to attack
    PlayerInRange { enemy: EntityId },
    /// The player left attack range but is still detected
    PlayerOutOfRange { enemy: EntityId },
    /// The enemy took damage and survived
    EnemyDamaged { enemy: EntityId },
    /// The enemy's health reached zero
    HealthDepleted { enemy: EntityId },
    /// The enemy was knocked out
    EnemyStunned { enemy: EntityId },
    /// A knocked-out enemy is getting back up
    EnemyRevived { enemy: EntityId },
}

impl GameEvent {
    /// The enemy this event is aimed at
    pub fn enemy(&self) -> EntityId {
        match *self {
            GameEvent::PlayerDetected { enemy }
            | GameEvent::PlayerInRange { enemy }
            | GameEvent::PlayerOutOfRange { enemy }
            | GameEvent::EnemyDamaged { enemy }
            | GameEvent::HealthDepleted { enemy }
            | GameEvent::EnemyStunned { enemy }
            | GameEvent::EnemyRevived { enemy } => enemy,
        }
    }
}
