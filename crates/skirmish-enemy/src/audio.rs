//! Sound cues raised by enemy states and their mapping to playback commands
//!
//! States only say *what* happened. `CueMixer` owns the sound names and the
//! volume policy, so behavior code never reads audio settings.

use skirmish_core::{AudioConfig, EntityId, Vec3};

/// A fire-and-forget sound request from an enemy state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundCue {
    /// An enemy noticed the player and started following
    PlayerDetected { enemy: EntityId, position: Vec3 },
}

/// A sound for the audio backend to play
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    /// Play a sound, optionally at a 3D position
    Play {
        sound: String,
        position: Option<Vec3>,
        volume: f64,
    },
}

/// Turns cues into audio commands using the configured sounds and volume
#[derive(Debug, Clone)]
pub struct CueMixer {
    config: AudioConfig,
}

impl Default for CueMixer {
    fn default() -> Self {
        Self::new(AudioConfig::default())
    }
}

impl CueMixer {
    pub fn new(config: AudioConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    /// Map one cue to a command. A silent mixer (volume <= 0) produces nothing.
    pub fn mix(&self, cue: &SoundCue) -> Option<AudioCommand> {
        if self.config.cue_volume <= 0.0 {
            return None;
        }

        match *cue {
            SoundCue::PlayerDetected { enemy, position } => {
                log::trace!("Enemy {} alert cue", enemy);
                Some(AudioCommand::Play {
                    sound: self.config.player_detected_sound.clone(),
                    position: Some(position),
                    volume: self.config.cue_volume,
                })
            }
        }
    }

    /// Map a batch of cues, keeping their order
    pub fn mix_all<'a, I>(&self, cues: I) -> Vec<AudioCommand>
    where
        I: IntoIterator<Item = &'a SoundCue>,
    {
        cues.into_iter().filter_map(|cue| self.mix(cue)).collect()
    }
}
