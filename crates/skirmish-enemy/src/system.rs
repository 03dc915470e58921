//! Enemy system: perception, trigger dispatch, and per-enemy ticking

use crate::audio::{AudioCommand, CueMixer};
use crate::context::EnemyContext;
use crate::level::Level;
use crate::perception::Perception;
use crate::state::EnemyState;
use skirmish_core::{AudioConfig, EnemyConfig, Result};
use skirmish_runtime::{GameEvent, RuntimeSystem};

/// The state an external trigger moves an enemy into, if it applies.
///
/// Triggers that make no sense for the current state (a defeated enemy
/// noticing the player, a conscious enemy being revived) are dropped.
pub fn reaction(current: EnemyState, event: &GameEvent) -> Option<EnemyState> {
    use EnemyState::*;

    match (event, current) {
        (GameEvent::PlayerDetected { .. }, Inactive) => Some(Following),
        (GameEvent::PlayerInRange { .. }, Following) => Some(Attacking),
        (GameEvent::PlayerOutOfRange { .. }, Attacking) => Some(Following),
        (GameEvent::EnemyDamaged { .. }, Inactive | Following | Attacking | WakeUp) => {
            Some(Attacked)
        }
        (GameEvent::HealthDepleted { .. }, state) if state != Dying => Some(Dying),
        (GameEvent::EnemyStunned { .. }, state) if state != Dying && state != Unconscious => {
            Some(Unconscious)
        }
        (GameEvent::EnemyRevived { .. }, Unconscious) => Some(WakeUp),
        _ => None,
    }
}

/// Ticks every enemy in a `Level` at the fixed rate.
///
/// One fixed step:
/// 1. Perception raises detection triggers onto the level's bus
/// 2. Every pending trigger is turned into a state change
/// 3. Each enemy's model advances, then its state's per-tick logic runs
/// 4. Sound cues from new states are mixed into audio commands
pub struct EnemySystem {
    perception: Perception,
    mixer: CueMixer,
    audio: Vec<AudioCommand>,
}

impl EnemySystem {
    pub fn new(perception: Perception, mixer: CueMixer) -> Self {
        Self {
            perception,
            mixer,
            audio: Vec::new(),
        }
    }

    pub fn from_config(enemy: &EnemyConfig, audio: &AudioConfig) -> Self {
        Self::new(Perception::from_config(enemy), CueMixer::new(audio.clone()))
    }

    pub fn perception(&self) -> &Perception {
        &self.perception
    }

    /// Take the audio commands produced since the last drain
    pub fn drain_audio(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.audio)
    }

    fn dispatch(enemies: &mut [EnemyContext], event: GameEvent) -> Result<()> {
        let id = event.enemy();
        let Some(ctx) = enemies.iter_mut().find(|ctx| ctx.enemy().id == id) else {
            log::warn!("Dropping {:?}: enemy {} is gone", event, id);
            return Ok(());
        };

        match reaction(ctx.current_state(), &event) {
            Some(next) => ctx.change_state(next),
            None => {
                log::trace!(
                    "Enemy {} ignores {:?} while {}",
                    id,
                    event,
                    ctx.current_state()
                );
                Ok(())
            }
        }
    }
}

impl RuntimeSystem for EnemySystem {
    type World = Level;

    fn initialize(&mut self, world: &mut Level) -> Result<()> {
        let events = self
            .perception
            .scan(&world.player, world.enemies().iter().map(|ctx| ctx.enemy()));
        world.events.extend(events);
        log::info!(
            "Enemy system initialized ({} enemies)",
            world.enemies().len()
        );
        Ok(())
    }

    fn fixed_update(&mut self, world: &mut Level, dt: f64) -> Result<()> {
        let events = self
            .perception
            .scan(&world.player, world.enemies().iter().map(|ctx| ctx.enemy()));
        world.events.extend(events);

        for event in world.events.drain() {
            Self::dispatch(world.enemies_mut(), event)?;
        }

        let player = world.player;
        let scene = world.scene;
        let mut refreshed = Vec::new();
        for ctx in world.enemies_mut() {
            let before = ctx.current_state();
            ctx.enemy_mut().advance(dt, &scene)?;
            ctx.update(&player, &scene)?;

            // A state that ended on its own gets a fresh look at the player
            if ctx.current_state() != before {
                refreshed.extend(self.perception.refresh(&player, ctx.enemy()));
            }

            let cues = ctx.drain_cues();
            self.audio.extend(self.mixer.mix_all(&cues));
        }
        world.events.extend(refreshed);

        Ok(())
    }

    fn update(&mut self, _world: &mut Level, _dt: f64) -> Result<()> {
        // Behavior runs at the fixed rate only
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        log::info!("Enemy system shut down");
        Ok(())
    }

    fn name(&self) -> &str {
        "enemy"
    }
}
