//! Encounter scripts for `skirmish simulate`
//!
//! ```toml
//! [player]
//! x = 6.0
//!
//! [[enemies]]
//! x = 0.0
//! state = "Inactive"
//!
//! [[events]]
//! at = 4.0
//! action = "damage"
//! enemy = 0
//! amount = 1.0
//! ```
//! Enemies are referred to by their index in `enemies`.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use skirmish_enemy::EnemyState;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Encounter {
    #[serde(default)]
    pub player: PlayerSpawn,
    #[serde(default = "default_enemies")]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSpawn {
    #[serde(default = "default_player_x")]
    pub x: f32,
    /// Horizontal walking speed in units per second
    #[serde(default)]
    pub speed: f32,
}

impl Default for PlayerSpawn {
    fn default() -> Self {
        Self {
            x: default_player_x(),
            speed: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnemySpawn {
    #[serde(default)]
    pub x: f32,
    #[serde(default = "default_state")]
    pub state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptEvent {
    /// Simulated time in seconds
    pub at: f64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    Damage {
        enemy: usize,
        #[serde(default = "default_damage")]
        amount: f32,
    },
    Stun {
        enemy: usize,
    },
    Revive {
        enemy: usize,
    },
    MovePlayer {
        x: Option<f32>,
        speed: Option<f32>,
    },
}

impl ScriptAction {
    fn enemy(&self) -> Option<usize> {
        match *self {
            ScriptAction::Damage { enemy, .. }
            | ScriptAction::Stun { enemy }
            | ScriptAction::Revive { enemy } => Some(enemy),
            ScriptAction::MovePlayer { .. } => None,
        }
    }
}

fn default_player_x() -> f32 {
    6.0
}
fn default_state() -> String {
    "Inactive".to_string()
}
fn default_damage() -> f32 {
    1.0
}
fn default_enemies() -> Vec<EnemySpawn> {
    vec![EnemySpawn {
        x: 0.0,
        state: default_state(),
    }]
}

impl Default for Encounter {
    fn default() -> Self {
        Self {
            player: PlayerSpawn::default(),
            enemies: default_enemies(),
            events: Vec::new(),
        }
    }
}

impl Encounter {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Parse and validate a script. Events come back sorted by time.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut encounter: Encounter = toml::from_str(content)?;

        for spawn in &encounter.enemies {
            spawn.initial_state()?;
        }
        for event in &encounter.events {
            if !(event.at.is_finite() && event.at >= 0.0) {
                bail!("event time must be non-negative, got {}", event.at);
            }
            if let Some(index) = event.action.enemy() {
                if index >= encounter.enemies.len() {
                    bail!(
                        "event at {}s targets enemy {} but only {} are spawned",
                        event.at,
                        index,
                        encounter.enemies.len()
                    );
                }
            }
        }

        encounter.events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(encounter)
    }
}

impl EnemySpawn {
    pub fn initial_state(&self) -> Result<EnemyState> {
        Ok(self.state.parse::<EnemyState>()?)
    }
}
