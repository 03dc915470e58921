//! Keyframe clip data

use crate::skeleton::JointPose;
use serde::{Deserialize, Serialize};
use skirmish_core::{Result, SkirmishError};

/// How to interpolate between a bone's keyframes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum Interpolation {
    /// Hold the earlier keyframe until the next one is reached
    Step,
    /// Linear translation/scale, shortest-path slerp rotation
    #[default]
    Linear,
}

/// A (bone, time, bone-local pose) triple
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub bone: usize,
    /// Time in seconds from clip start
    pub time: f64,
    pub pose: JointPose,
}

/// A named, fixed-duration set of per-bone keyframes.
///
/// Keyframes are kept sorted ascending by time (ties keep authoring order)
/// and indexed per bone so sampling never scans other bones' keys.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    name: String,
    duration: f64,
    interpolation: Interpolation,
    keyframes: Vec<Keyframe>,
    /// `bone_keys[bone]` = indices into `keyframes`, ascending by time
    bone_keys: Vec<Vec<usize>>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f64, keyframes: Vec<Keyframe>) -> Result<Self> {
        Self::with_interpolation(name, duration, Interpolation::Linear, keyframes)
    }

    pub fn with_interpolation(
        name: impl Into<String>,
        duration: f64,
        interpolation: Interpolation,
        mut keyframes: Vec<Keyframe>,
    ) -> Result<Self> {
        let name = name.into();

        if !(duration.is_finite() && duration > 0.0) {
            return Err(SkirmishError::InvalidSkeleton(format!(
                "clip '{}' has non-positive duration: {}",
                name, duration
            )));
        }
        if keyframes.is_empty() {
            return Err(SkirmishError::InvalidSkeleton(format!(
                "clip '{}' has no keyframes",
                name
            )));
        }
        if let Some(kf) = keyframes
            .iter()
            .find(|kf| !(kf.time >= 0.0 && kf.time <= duration))
        {
            return Err(SkirmishError::InvalidSkeleton(format!(
                "clip '{}' has a keyframe for bone {} at {} outside [0, {}]",
                name, kf.bone, kf.time, duration
            )));
        }

        // Stable: keys sharing a timestamp keep their authored order
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));

        let bone_count = keyframes.iter().map(|kf| kf.bone + 1).max().unwrap_or(0);
        let mut bone_keys = vec![Vec::new(); bone_count];
        for (i, kf) in keyframes.iter().enumerate() {
            bone_keys[kf.bone].push(i);
        }

        Ok(Self {
            name,
            duration,
            interpolation,
            keyframes,
            bone_keys,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// All keyframes, ascending by time
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Keyframes of one bone, ascending by time
    pub fn bone_keyframes(&self, bone: usize) -> impl Iterator<Item = &Keyframe> + '_ {
        self.bone_keys
            .get(bone)
            .into_iter()
            .flatten()
            .map(move |&i| &self.keyframes[i])
    }

    pub(crate) fn bone_key_indices(&self, bone: usize) -> &[usize] {
        self.bone_keys.get(bone).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Highest bone index referenced by any keyframe
    pub fn max_bone_index(&self) -> Option<usize> {
        self.bone_keys.len().checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(bone: usize, time: f64, x: f32) -> Keyframe {
        Keyframe {
            bone,
            time,
            pose: JointPose {
                translation: [x, 0.0, 0.0],
                ..Default::default()
            },
        }
    }

    #[test]
    fn keyframes_are_sorted_by_time() {
        let clip = AnimationClip::new(
            "Walking",
            2.0,
            vec![key(0, 2.0, 3.0), key(1, 0.5, 1.0), key(0, 0.0, 0.0)],
        )
        .unwrap();
        let times: Vec<f64> = clip.keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 0.5, 2.0]);
    }

    #[test]
    fn keyframes_are_partitioned_by_bone() {
        let clip = AnimationClip::new(
            "Walking",
            2.0,
            vec![key(0, 2.0, 3.0), key(1, 0.5, 1.0), key(0, 0.0, 0.0)],
        )
        .unwrap();
        let bone0: Vec<f64> = clip.bone_keyframes(0).map(|k| k.time).collect();
        let bone1: Vec<f64> = clip.bone_keyframes(1).map(|k| k.time).collect();
        assert_eq!(bone0, vec![0.0, 2.0]);
        assert_eq!(bone1, vec![0.5]);
        assert_eq!(clip.bone_keyframes(7).count(), 0);
        assert_eq!(clip.max_bone_index(), Some(1));
    }

    #[test]
    fn equal_times_keep_authored_order() {
        let clip =
            AnimationClip::new("Tie", 1.0, vec![key(0, 0.5, 1.0), key(0, 0.5, 2.0)]).unwrap();
        let xs: Vec<f32> = clip
            .bone_keyframes(0)
            .map(|k| k.pose.translation[0])
            .collect();
        assert_eq!(xs, vec![1.0, 2.0]);
    }

    #[test]
    fn reject_zero_duration() {
        let result = AnimationClip::new("bad", 0.0, vec![key(0, 0.0, 0.0)]);
        assert!(matches!(result, Err(SkirmishError::InvalidSkeleton(_))));
    }

    #[test]
    fn reject_no_keyframes() {
        let result = AnimationClip::new("empty", 1.0, vec![]);
        assert!(matches!(result, Err(SkirmishError::InvalidSkeleton(_))));
    }

    #[test]
    fn reject_keyframe_past_duration() {
        let result = AnimationClip::new("late", 1.0, vec![key(0, 1.5, 0.0)]);
        assert!(matches!(result, Err(SkirmishError::InvalidSkeleton(_))));
    }
}
