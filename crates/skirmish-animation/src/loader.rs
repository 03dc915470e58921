//! TOML-based model loading
//!
//! A `.model.toml` describes a skeleton in bind pose and its clips:
//! ```toml
//! name = "grunt"
//!
//! [[bones]]
//! name = "root"
//!
//! [[bones]]
//! name = "arm"
//! parent = "root"
//! translation = [0.0, 1.5, 0.0]
//!
//! [[clips]]
//! name = "Waiting"
//! duration = 2.0
//!
//! [[clips.keyframes]]
//! bone = "arm"
//! time = 0.0
//! rotation = [0.0, 0.0, 0.0, 1.0]
//! ```
//! Keyframe components that are omitted fall back to the bone's bind pose.

use crate::clip::{AnimationClip, Interpolation, Keyframe};
use crate::skeleton::{JointPose, Skeleton, SkinningData};
use serde::Deserialize;
use skirmish_core::{Result, SkirmishError};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ModelFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    bones: Vec<BoneDef>,
    #[serde(default)]
    clips: Vec<ClipDef>,
}

#[derive(Debug, Deserialize)]
struct BoneDef {
    name: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    translation: Option<[f32; 3]>,
    #[serde(default)]
    rotation: Option<[f32; 4]>,
    #[serde(default)]
    scale: Option<[f32; 3]>,
}

#[derive(Debug, Deserialize)]
struct ClipDef {
    name: String,
    duration: f64,
    #[serde(default)]
    interpolation: Interpolation,
    #[serde(default)]
    keyframes: Vec<KeyframeDef>,
}

#[derive(Debug, Deserialize)]
struct KeyframeDef {
    bone: String,
    time: f64,
    #[serde(default)]
    translation: Option<[f32; 3]>,
    #[serde(default)]
    rotation: Option<[f32; 4]>,
    #[serde(default)]
    scale: Option<[f32; 3]>,
}

/// Load a model's skinning data from a `.model.toml` file
pub fn load_model_from_file(path: &Path) -> Result<SkinningData> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SkirmishError::AnimationError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    load_model_from_str(&content, path)
}

/// Parse a model from a TOML string. `path` is only used in error messages.
pub fn load_model_from_str(content: &str, path: &Path) -> Result<SkinningData> {
    let model: ModelFile = toml::from_str(content).map_err(|e| {
        SkirmishError::AnimationError(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    if model.bones.is_empty() {
        return Err(SkirmishError::InvalidSkeleton(format!(
            "{} has no skeleton",
            path.display()
        )));
    }

    let bone_names: Vec<String> = model.bones.iter().map(|b| b.name.clone()).collect();
    let mut parents = Vec::with_capacity(model.bones.len());
    let mut bind_pose = Vec::with_capacity(model.bones.len());

    for (i, bone) in model.bones.iter().enumerate() {
        let parent = match &bone.parent {
            None => None,
            Some(parent_name) => {
                // Parents must be declared before their children
                let idx = bone_names[..i]
                    .iter()
                    .position(|n| n == parent_name)
                    .ok_or_else(|| {
                        SkirmishError::InvalidSkeleton(format!(
                            "bone '{}' references parent '{}' which is not declared before it",
                            bone.name, parent_name
                        ))
                    })?;
                Some(idx)
            }
        };
        parents.push(parent);

        let rest = JointPose::default();
        bind_pose.push(JointPose {
            translation: bone.translation.unwrap_or(rest.translation),
            rotation: bone.rotation.unwrap_or(rest.rotation),
            scale: bone.scale.unwrap_or(rest.scale),
        });
    }

    let skeleton = Skeleton::from_bind_pose(bone_names, parents, bind_pose)?;

    let mut clips = Vec::with_capacity(model.clips.len());
    for clip_def in model.clips {
        let mut keyframes = Vec::with_capacity(clip_def.keyframes.len());
        for kf in clip_def.keyframes {
            let bone = skeleton.bone_index(&kf.bone).ok_or_else(|| {
                SkirmishError::InvalidSkeleton(format!(
                    "clip '{}' keys unknown bone '{}'",
                    clip_def.name, kf.bone
                ))
            })?;
            let rest = skeleton.bind_pose[bone];
            keyframes.push(Keyframe {
                bone,
                time: kf.time,
                pose: JointPose {
                    translation: kf.translation.unwrap_or(rest.translation),
                    rotation: kf.rotation.unwrap_or(rest.rotation),
                    scale: kf.scale.unwrap_or(rest.scale),
                },
            });
        }
        clips.push(AnimationClip::with_interpolation(
            clip_def.name,
            clip_def.duration,
            clip_def.interpolation,
            keyframes,
        )?);
    }

    let data = SkinningData::new(skeleton, clips)?;
    log::debug!(
        "Loaded model '{}' ({} bones, {} clips)",
        model.name,
        data.skeleton().bone_count(),
        data.clip_count()
    );
    Ok(data)
}
