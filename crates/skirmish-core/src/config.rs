//! Layered game configuration
//!
//! Config is resolved with three layers of precedence (highest wins):
//! 1. Environment variables: `SKIRMISH_{SECTION}_{KEY}` (e.g. `SKIRMISH_AUDIO_CUE_VOLUME`)
//! 2. A TOML file passed by the caller
//! 3. Built-in defaults

use crate::{Result, SkirmishError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed-step simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_fixed_hz")]
    pub fixed_hz: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_hz: default_fixed_hz(),
        }
    }
}

fn default_fixed_hz() -> f64 {
    60.0
}

/// Tuning shared by every spawned enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyConfig {
    /// Horizontal/vertical speed cap in units per second
    #[serde(default = "default_max_speed")]
    pub max_speed: [f32; 2],
    #[serde(default = "default_health")]
    pub health: f32,
    /// Horizontal distance at which the player is noticed
    #[serde(default = "default_detection_range")]
    pub detection_range: f32,
    /// Horizontal distance at which the enemy starts attacking
    #[serde(default = "default_attack_range")]
    pub attack_range: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_speed: default_max_speed(),
            health: default_health(),
            detection_range: default_detection_range(),
            attack_range: default_attack_range(),
        }
    }
}

fn default_max_speed() -> [f32; 2] {
    [2.0, 0.0]
}
fn default_health() -> f32 {
    3.0
}
fn default_detection_range() -> f32 {
    8.0
}
fn default_attack_range() -> f32 {
    1.0
}

/// Sound cue policy. The audio collaborator owns the volume, not the AI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_volume")]
    pub cue_volume: f64,
    #[serde(default = "default_detected_sound")]
    pub player_detected_sound: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            cue_volume: default_volume(),
            player_detected_sound: default_detected_sound(),
        }
    }
}

fn default_volume() -> f64 {
    1.0
}
fn default_detected_sound() -> String {
    "enemy_alert".to_string()
}

/// Horizontal extent of the playable level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_min_x")]
    pub min_x: f32,
    #[serde(default = "default_max_x")]
    pub max_x: f32,
    #[serde(default)]
    pub ground_y: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            min_x: default_min_x(),
            max_x: default_max_x(),
            ground_y: 0.0,
        }
    }
}

fn default_min_x() -> f32 {
    -100.0
}
fn default_max_x() -> f32 {
    100.0
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub enemy: EnemyConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub scene: SceneConfig,
}

impl GameConfig {
    /// Load defaults, then the optional file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from a TOML string without environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SkirmishError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply `SKIRMISH_*` overrides. `lookup` is injected so tests don't touch
    /// the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: std::str::FromStr>(key: &str, raw: String) -> Result<T> {
            raw.trim().parse().map_err(|_| {
                SkirmishError::ConfigError(format!("{} has an invalid value: {}", key, raw))
            })
        }

        if let Some(v) = lookup("SKIRMISH_SIMULATION_FIXED_HZ") {
            self.simulation.fixed_hz = parse("SKIRMISH_SIMULATION_FIXED_HZ", v)?;
        }
        if let Some(v) = lookup("SKIRMISH_ENEMY_HEALTH") {
            self.enemy.health = parse("SKIRMISH_ENEMY_HEALTH", v)?;
        }
        if let Some(v) = lookup("SKIRMISH_ENEMY_DETECTION_RANGE") {
            self.enemy.detection_range = parse("SKIRMISH_ENEMY_DETECTION_RANGE", v)?;
        }
        if let Some(v) = lookup("SKIRMISH_ENEMY_ATTACK_RANGE") {
            self.enemy.attack_range = parse("SKIRMISH_ENEMY_ATTACK_RANGE", v)?;
        }
        if let Some(v) = lookup("SKIRMISH_AUDIO_CUE_VOLUME") {
            self.audio.cue_volume = parse("SKIRMISH_AUDIO_CUE_VOLUME", v)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let hz = self.simulation.fixed_hz;
        if !(hz.is_finite() && hz > 0.0) {
            return Err(SkirmishError::ConfigError(format!(
                "simulation.fixed_hz must be a positive finite rate, got {}",
                self.simulation.fixed_hz
            )));
        }
        if self.enemy.attack_range > self.enemy.detection_range {
            return Err(SkirmishError::ConfigError(format!(
                "enemy.attack_range ({}) exceeds enemy.detection_range ({})",
                self.enemy.attack_range, self.enemy.detection_range
            )));
        }
        if self.scene.min_x >= self.scene.max_x {
            return Err(SkirmishError::ConfigError(
                "scene.min_x must be less than scene.max_x".to_string(),
            ));
        }
        Ok(())
    }
}
