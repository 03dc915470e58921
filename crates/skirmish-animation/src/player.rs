//! Per-instance skeletal clip playback

use crate::sampler::sample_clip;
use crate::skeleton::{JointPose, SkinningData};
use skirmish_core::{Mat4, Result, SkirmishError, MAT4_IDENTITY};
use std::sync::Arc;

/// Positions this close below the clip end count as the end; summed
/// steps like 1/60 s land just short of exact totals
const END_TOLERANCE: f64 = 1e-9;

/// Plays one named clip against a model's skeleton.
///
/// The skeleton and clip table are shared through `Arc<SkinningData>`; the
/// only per-instance state is the active clip, playback position, loop and
/// done flags, and the output bone buffers.
///
/// Output pipeline on every `update`:
/// 1. Sample the clip into `bone_transforms` (bone-local poses)
/// 2. Walk the hierarchy root-to-leaf into `world_transforms`
/// 3. `skin_transforms[i] = world[i] * inverse_bind[i]` for vertex skinning
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    skinning: Arc<SkinningData>,
    current_clip: Option<String>,
    position: f64,
    looping: bool,
    done: bool,
    bone_transforms: Vec<JointPose>,
    world_transforms: Vec<Mat4>,
    skin_transforms: Vec<Mat4>,
}

impl AnimationPlayer {
    /// Create a player resting in the bind pose with no active clip
    pub fn new(skinning: Arc<SkinningData>) -> Self {
        let skeleton = skinning.skeleton();
        let count = skeleton.bone_count();
        let bone_transforms = skeleton.bind_pose.clone();
        let mut world_transforms = vec![MAT4_IDENTITY; count];
        let mut skin_transforms = vec![MAT4_IDENTITY; count];
        skeleton.compute_world_transforms(&bone_transforms, &mut world_transforms);
        skeleton.compute_skin_transforms(&world_transforms, &mut skin_transforms);

        Self {
            skinning,
            current_clip: None,
            position: 0.0,
            looping: false,
            done: false,
            bone_transforms,
            world_transforms,
            skin_transforms,
        }
    }

    /// Switch to the named clip from time zero.
    ///
    /// Requesting the clip that is already active leaves playback where it is
    /// and only updates the loop flag. An unknown name is rejected and the
    /// previous clip keeps playing.
    pub fn start_clip(&mut self, name: &str, looping: bool) -> Result<()> {
        if !self.skinning.has_clip(name) {
            log::error!("Animation clip '{}' not found", name);
            return Err(SkirmishError::ClipNotFound(name.to_string()));
        }

        if self.current_clip.as_deref() == Some(name) {
            log::debug!("Clip '{}' already active, keeping playback position", name);
            self.looping = looping;
            return Ok(());
        }

        log::debug!("Starting clip '{}' (loop: {})", name, looping);
        self.current_clip = Some(name.to_string());
        self.position = 0.0;
        self.looping = looping;
        self.done = false;
        self.refresh_pose();
        Ok(())
    }

    /// Advance playback by `elapsed` seconds and recompute all bone transforms
    pub fn update(&mut self, elapsed: f64) -> Result<()> {
        if !(elapsed.is_finite() && elapsed >= 0.0) {
            return Err(SkirmishError::AnimationError(format!(
                "elapsed time must be finite and non-negative, got {}",
                elapsed
            )));
        }

        let Some(name) = self.current_clip.as_deref() else {
            return Ok(());
        };
        let Some(clip) = self.skinning.clip(name) else {
            return Err(SkirmishError::ClipNotFound(name.to_string()));
        };
        let duration = clip.duration();

        self.position += elapsed;
        let reached_end = self.position >= duration - END_TOLERANCE;
        if self.looping {
            if reached_end {
                self.position %= duration;
                if duration - self.position < END_TOLERANCE {
                    self.position = 0.0;
                }
            }
        } else if reached_end {
            self.position = duration;
            self.done = true;
        }

        self.refresh_pose();
        Ok(())
    }

    fn refresh_pose(&mut self) {
        let skeleton = self.skinning.skeleton();
        if let Some(clip) = self
            .current_clip
            .as_deref()
            .and_then(|name| self.skinning.clip(name))
        {
            sample_clip(
                clip,
                self.position,
                &skeleton.bind_pose,
                &mut self.bone_transforms,
            );
        }
        skeleton.compute_world_transforms(&self.bone_transforms, &mut self.world_transforms);
        skeleton.compute_skin_transforms(&self.world_transforms, &mut self.skin_transforms);
    }

    /// True once a non-looping clip has reached its duration
    pub fn done(&self) -> bool {
        self.done
    }

    pub fn current_clip(&self) -> Option<&str> {
        self.current_clip.as_deref()
    }

    /// Playback position within the active clip, in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Bone-local poses
    pub fn bone_transforms(&self) -> &[JointPose] {
        &self.bone_transforms
    }

    /// Model-space bone matrices
    pub fn world_transforms(&self) -> &[Mat4] {
        &self.world_transforms
    }

    /// Skinning palette for the vertex shader
    pub fn skin_transforms(&self) -> &[Mat4] {
        &self.skin_transforms
    }

    pub fn skinning(&self) -> &Arc<SkinningData> {
        &self.skinning
    }
}
