//! Distance-based player detection
//!
//! Perception sorts each enemy's view of the player into a zone and raises a
//! `GameEvent` only when the zone changes, so the enemy system sees one
//! trigger per crossing instead of one per tick.

use crate::entity::{Enemy, Player};
use skirmish_core::{EnemyConfig, EntityId};
use skirmish_runtime::GameEvent;
use std::collections::{HashMap, HashSet};

/// Where the player is relative to one enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// Outside detection range
    #[default]
    Unaware,
    /// Detected but not close enough to attack
    Detected,
    /// Within attack range
    InRange,
}

/// Edge-triggered detection over every enemy
#[derive(Debug, Clone)]
pub struct Perception {
    detection_range: f32,
    attack_range: f32,
    zones: HashMap<EntityId, Zone>,
}

impl Perception {
    pub fn new(detection_range: f32, attack_range: f32) -> Self {
        Self {
            detection_range,
            attack_range,
            zones: HashMap::new(),
        }
    }

    pub fn from_config(config: &EnemyConfig) -> Self {
        Self::new(config.detection_range, config.attack_range)
    }

    /// Classify a horizontal distance
    pub fn classify(&self, distance: f32) -> Zone {
        if distance <= self.attack_range {
            Zone::InRange
        } else if distance <= self.detection_range {
            Zone::Detected
        } else {
            Zone::Unaware
        }
    }

    /// Last zone seen for `enemy`
    pub fn zone(&self, enemy: EntityId) -> Zone {
        self.zones.get(&enemy).copied().unwrap_or_default()
    }

    /// Re-evaluate one enemy and return the events for any zone change.
    ///
    /// Jumping straight from `Unaware` to `InRange` raises `PlayerDetected`
    /// before `PlayerInRange` so the enemy passes through Following.
    pub fn observe(&mut self, player: &Player, enemy: &Enemy) -> Vec<GameEvent> {
        let distance = (player.position.x - enemy.position.x).abs();
        let now = self.classify(distance);
        let before = self.zones.insert(enemy.id, now).unwrap_or_default();
        let id = enemy.id;

        match (before, now) {
            (Zone::Unaware, Zone::Detected) => vec![GameEvent::PlayerDetected { enemy: id }],
            (Zone::Unaware, Zone::InRange) => vec![
                GameEvent::PlayerDetected { enemy: id },
                GameEvent::PlayerInRange { enemy: id },
            ],
            (Zone::Detected, Zone::InRange) => vec![GameEvent::PlayerInRange { enemy: id }],
            (Zone::InRange, Zone::Detected | Zone::Unaware) => {
                vec![GameEvent::PlayerOutOfRange { enemy: id }]
            }
            _ => Vec::new(),
        }
    }

    /// Observe every enemy, in order. Zones of enemies missing from
    /// `enemies` are forgotten.
    pub fn scan<'a, I>(&mut self, player: &Player, enemies: I) -> Vec<GameEvent>
    where
        I: IntoIterator<Item = &'a Enemy>,
    {
        let mut seen = HashSet::new();
        let mut events = Vec::new();
        for enemy in enemies {
            seen.insert(enemy.id);
            events.extend(self.observe(player, enemy));
        }
        self.zones.retain(|id, _| {
            let keep = seen.contains(id);
            if !keep {
                log::trace!("Perception forgets enemy {}", id);
            }
            keep
        });
        events
    }

    /// Drop the zone recorded for `enemy`
    pub fn forget(&mut self, enemy: EntityId) {
        self.zones.remove(&enemy);
    }

    /// Number of enemies with a recorded zone
    pub fn tracked(&self) -> usize {
        self.zones.len()
    }

    /// Re-evaluate one enemy and report the zone as if it had just been entered.
    ///
    /// Used after an enemy changes state on its own (a hit reaction ends,
    /// it gets back up) so the new state learns where the player is.
    pub fn refresh(&mut self, player: &Player, enemy: &Enemy) -> Vec<GameEvent> {
        let distance = (player.position.x - enemy.position.x).abs();
        let now = self.classify(distance);
        self.zones.insert(enemy.id, now);
        let id = enemy.id;

        match now {
            Zone::Unaware => Vec::new(),
            Zone::Detected => vec![
                GameEvent::PlayerDetected { enemy: id },
                GameEvent::PlayerOutOfRange { enemy: id },
            ],
            Zone::InRange => vec![
                GameEvent::PlayerDetected { enemy: id },
                GameEvent::PlayerInRange { enemy: id },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::grunt_skinning;
    use skirmish_core::{Vec2, Vec3};

    fn enemy_at(x: f32) -> Enemy {
        Enemy::new(
            Vec3::new(x, 0.0, 0.0),
            Vec2::new(2.0, 0.0),
            3.0,
            grunt_skinning(),
        )
    }

    fn player_at(x: f32) -> Player {
        Player::at(Vec3::new(x, 0.0, 0.0))
    }

    #[test]
    fn events_fire_on_edges_only() {
        let mut perception = Perception::new(8.0, 1.0);
        let enemy = enemy_at(0.0);
        let id = enemy.id;

        assert!(perception.observe(&player_at(20.0), &enemy).is_empty());
        assert_eq!(
            perception.observe(&player_at(6.0), &enemy),
            vec![GameEvent::PlayerDetected { enemy: id }]
        );
        assert!(perception.observe(&player_at(5.0), &enemy).is_empty());
        assert_eq!(
            perception.observe(&player_at(-0.5), &enemy),
            vec![GameEvent::PlayerInRange { enemy: id }]
        );
        assert!(perception.observe(&player_at(0.5), &enemy).is_empty());
        assert_eq!(
            perception.observe(&player_at(3.0), &enemy),
            vec![GameEvent::PlayerOutOfRange { enemy: id }]
        );
        assert_eq!(perception.zone(id), Zone::Detected);
    }

    #[test]
    fn jump_into_range_raises_detection_first() {
        let mut perception = Perception::new(8.0, 1.0);
        let enemy = enemy_at(0.0);
        let id = enemy.id;
        assert_eq!(
            perception.observe(&player_at(1.0), &enemy),
            vec![
                GameEvent::PlayerDetected { enemy: id },
                GameEvent::PlayerInRange { enemy: id },
            ]
        );
    }

    #[test]
    fn refresh_reports_current_zone() {
        let mut perception = Perception::new(8.0, 1.0);
        let enemy = enemy_at(0.0);
        let id = enemy.id;
        perception.observe(&player_at(4.0), &enemy);
        assert!(perception.observe(&player_at(4.0), &enemy).is_empty());

        assert_eq!(
            perception.refresh(&player_at(4.0), &enemy),
            vec![
                GameEvent::PlayerDetected { enemy: id },
                GameEvent::PlayerOutOfRange { enemy: id },
            ]
        );
        assert_eq!(perception.refresh(&player_at(0.5), &enemy).len(), 2);
        assert_eq!(perception.zone(id), Zone::InRange);
        assert!(perception.refresh(&player_at(30.0), &enemy).is_empty());
        assert_eq!(perception.zone(id), Zone::Unaware);
    }

    #[test]
    fn scan_tracks_enemies_independently() {
        let mut perception = Perception::from_config(&EnemyConfig::default());
        let near = enemy_at(2.0);
        let far = enemy_at(50.0);
        let events = perception.scan(&player_at(0.0), [&near, &far]);
        assert_eq!(events, vec![GameEvent::PlayerDetected { enemy: near.id }]);
        assert_eq!(perception.zone(far.id), Zone::Unaware);
    }

    #[test]
    fn scan_forgets_missing_enemies() {
        let mut perception = Perception::new(8.0, 1.0);
        let stays = enemy_at(2.0);
        let leaves = enemy_at(4.0);
        perception.scan(&player_at(0.0), [&stays, &leaves]);
        assert_eq!(perception.tracked(), 2);

        perception.scan(&player_at(0.0), [&stays]);
        assert_eq!(perception.tracked(), 1);
        assert_eq!(perception.zone(leaves.id), Zone::Unaware);
        assert_eq!(perception.zone(stays.id), Zone::Detected);

        perception.forget(stays.id);
        assert_eq!(perception.tracked(), 0);
    }
}
