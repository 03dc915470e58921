//! Enemy behavior states
//!
//! Each variant carries no data: everything enemy-specific lives in the
//! `EnemyContext`, so one `EnemyState` value is shared by every enemy and
//! comparing two states compares variants.
//!
//! | State       | Clip           | Loop | Speed | Per tick                                  |
//! |-------------|----------------|------|-------|-------------------------------------------|
//! | Inactive    | `Waiting`      | yes  | 0.25  | hold horizontal position                  |
//! | Following   | `Walking`      | yes  | 0.75  | turn toward and chase the player          |
//! | Attacking   | `RepeatAttack` | yes  | 5.0   | hold horizontal position                  |
//! | Attacked    | `Attacked`     | no   | 2.0   | on completion, return to previous state   |
//! | Dying       | `Dying`        | no   | 1.0   | slide away at (1, 0)                      |
//! | Unconscious | `Dying`        | no   | 1.0   | stand still                               |
//! | WakeUp      | `WakingUp`     | no   | 1.0   | on completion, go Inactive                |

use crate::audio::SoundCue;
use crate::context::EnemyContext;
use crate::entity::{Direction, Player};
use crate::scene::Scene;
use skirmish_core::{Result, SkirmishError, Vec2};
use std::fmt;
use std::str::FromStr;

/// Yaw in degrees for an enemy facing left
pub const FACING_LEFT_YAW: f32 = 270.0;
/// Yaw in degrees for an enemy facing right
pub const FACING_RIGHT_YAW: f32 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyState {
    Inactive,
    Following,
    Attacking,
    Attacked,
    Dying,
    Unconscious,
    WakeUp,
}

impl EnemyState {
    pub const ALL: [EnemyState; 7] = [
        EnemyState::Inactive,
        EnemyState::Following,
        EnemyState::Attacking,
        EnemyState::Attacked,
        EnemyState::Dying,
        EnemyState::Unconscious,
        EnemyState::WakeUp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyState::Inactive => "Inactive",
            EnemyState::Following => "Following",
            EnemyState::Attacking => "Attacking",
            EnemyState::Attacked => "Attacked",
            EnemyState::Dying => "Dying",
            EnemyState::Unconscious => "Unconscious",
            EnemyState::WakeUp => "WakeUp",
        }
    }

    /// Clip name, loop flag, and playback speed selected on entry
    pub fn clip(&self) -> (&'static str, bool, f64) {
        match self {
            EnemyState::Inactive => ("Waiting", true, 0.25),
            EnemyState::Following => ("Walking", true, 0.75),
            EnemyState::Attacking => ("RepeatAttack", true, 5.0),
            EnemyState::Attacked => ("Attacked", false, 2.0),
            EnemyState::Dying => ("Dying", false, 1.0),
            EnemyState::Unconscious => ("Dying", false, 1.0),
            EnemyState::WakeUp => ("WakingUp", false, 1.0),
        }
    }

    /// Configure the enemy's model for this state
    pub fn start_animation(self, ctx: &mut EnemyContext) -> Result<()> {
        let (clip, looping, speed) = self.clip();
        let model = &mut ctx.enemy_mut().model;
        model.animation.start_clip(clip, looping)?;
        model.time_speed = speed;

        if self == EnemyState::Following {
            let enemy = ctx.enemy();
            let cue = SoundCue::PlayerDetected {
                enemy: enemy.id,
                position: enemy.position,
            };
            ctx.emit(cue);
        }
        Ok(())
    }

    /// Per-tick behavior; may transition `ctx` to another state
    pub fn handle(self, ctx: &mut EnemyContext, player: &Player, _scene: &Scene) -> Result<()> {
        match self {
            EnemyState::Inactive | EnemyState::Attacking => {
                ctx.enemy_mut().speed.x = 0.0;
            }
            EnemyState::Following => {
                let enemy = ctx.enemy_mut();
                // Distance is rounded before the sign test so the enemy stops
                // within half a unit of the player.
                let dx = (player.position.x - enemy.position.x).round_ties_even();
                if dx < 0.0 {
                    enemy.face(Direction::Left);
                    enemy.rotation.y = FACING_LEFT_YAW;
                    enemy.speed.x = -enemy.max_speed.x;
                } else if dx > 0.0 {
                    enemy.face(Direction::Right);
                    enemy.rotation.y = FACING_RIGHT_YAW;
                    enemy.speed.x = enemy.max_speed.x;
                }
            }
            EnemyState::Attacked => {
                if ctx.enemy().model.animation.done() {
                    ctx.enemy_mut().model.damaged = false;
                    let back = ctx.previous_state().unwrap_or(EnemyState::Inactive);
                    ctx.change_state(back)?;
                }
            }
            EnemyState::Dying => {
                ctx.enemy_mut().speed = Vec2::new(1.0, 0.0);
            }
            EnemyState::Unconscious => {
                ctx.enemy_mut().speed = Vec2::ZERO;
            }
            EnemyState::WakeUp => {
                if ctx.enemy().model.animation.done() {
                    ctx.change_state(EnemyState::Inactive)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for EnemyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnemyState {
    type Err = SkirmishError;

    /// Parse a state name, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self> {
        EnemyState::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SkirmishError::ConfigError(format!("unknown enemy state '{}'", s)))
    }
}
