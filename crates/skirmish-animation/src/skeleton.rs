//! Bone hierarchy, bind pose, and the shared skinning data of a model

use crate::clip::AnimationClip;
use serde::{Deserialize, Serialize};
use skirmish_core::{mat4_mul, Mat4, Result, SkirmishError, MAT4_IDENTITY};
use std::collections::HashMap;

/// Hard cap on bones per skeleton, matching the skinning shader's palette size
pub const MAX_BONES: usize = 72;

/// A single bone's local-space pose (translation, rotation, scale)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointPose {
    pub translation: [f32; 3],
    pub rotation: [f32; 4], // quaternion xyzw
    pub scale: [f32; 3],
}

impl Default for JointPose {
    fn default() -> Self {
        Self {
            translation: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

impl JointPose {
    /// Column-major TRS matrix for this pose
    pub fn to_mat4(&self) -> Mat4 {
        let [tx, ty, tz] = self.translation;
        let [qx, qy, qz, qw] = self.rotation;
        let [sx, sy, sz] = self.scale;

        let x2 = qx + qx;
        let y2 = qy + qy;
        let z2 = qz + qz;
        let xx = qx * x2;
        let xy = qx * y2;
        let xz = qx * z2;
        let yy = qy * y2;
        let yz = qy * z2;
        let zz = qz * z2;
        let wx = qw * x2;
        let wy = qw * y2;
        let wz = qw * z2;

        [
            [(1.0 - (yy + zz)) * sx, (xy + wz) * sx, (xz - wy) * sx, 0.0],
            [(xy - wz) * sy, (1.0 - (xx + zz)) * sy, (yz + wx) * sy, 0.0],
            [(xz + wy) * sz, (yz - wx) * sz, (1.0 - (xx + yy)) * sz, 0.0],
            [tx, ty, tz, 1.0],
        ]
    }

    /// Inverse of `to_mat4`: `S^-1 * R^T * T^-1`
    pub fn to_inverse_mat4(&self) -> Mat4 {
        let [tx, ty, tz] = self.translation;
        let [qx, qy, qz, qw] = self.rotation;
        let [sx, sy, sz] = self.scale;

        let mut inv_scale = MAT4_IDENTITY;
        inv_scale[0][0] = 1.0 / sx;
        inv_scale[1][1] = 1.0 / sy;
        inv_scale[2][2] = 1.0 / sz;

        let inv_rotation = JointPose {
            translation: [0.0; 3],
            rotation: [-qx, -qy, -qz, qw],
            scale: [1.0; 3],
        }
        .to_mat4();

        let mut inv_translation = MAT4_IDENTITY;
        inv_translation[3] = [-tx, -ty, -tz, 1.0];

        mat4_mul(&mat4_mul(&inv_scale, &inv_rotation), &inv_translation)
    }
}

/// Bone hierarchy with bind pose and inverse bind matrices.
///
/// Bones are stored in topological order: a bone's parent always has a lower
/// index, so a single forward pass computes world transforms.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub bone_names: Vec<String>,
    pub parents: Vec<Option<usize>>,
    pub bind_pose: Vec<JointPose>,
    pub inverse_bind_matrices: Vec<Mat4>,
}

impl Skeleton {
    /// Build a skeleton from its bind pose, deriving inverse bind matrices
    /// from the bind-pose world chain.
    pub fn from_bind_pose(
        bone_names: Vec<String>,
        parents: Vec<Option<usize>>,
        bind_pose: Vec<JointPose>,
    ) -> Result<Self> {
        if parents.len() != bone_names.len() || bind_pose.len() != bone_names.len() {
            return Err(SkirmishError::InvalidSkeleton(format!(
                "{} bone names, {} parents, {} bind poses",
                bone_names.len(),
                parents.len(),
                bind_pose.len()
            )));
        }
        validate_hierarchy(&parents)?;

        let mut inverse_bind_matrices: Vec<Mat4> = Vec::with_capacity(bind_pose.len());
        for (i, pose) in bind_pose.iter().enumerate() {
            let local_inverse = pose.to_inverse_mat4();
            let inverse = match parents[i] {
                Some(parent) => mat4_mul(&local_inverse, &inverse_bind_matrices[parent]),
                None => local_inverse,
            };
            inverse_bind_matrices.push(inverse);
        }

        Self::new(bone_names, parents, bind_pose, inverse_bind_matrices)
    }

    /// Build a skeleton from explicit inverse bind matrices
    pub fn new(
        bone_names: Vec<String>,
        parents: Vec<Option<usize>>,
        bind_pose: Vec<JointPose>,
        inverse_bind_matrices: Vec<Mat4>,
    ) -> Result<Self> {
        let count = bone_names.len();
        if count == 0 {
            return Err(SkirmishError::InvalidSkeleton(
                "skeleton has no bones".to_string(),
            ));
        }
        if count > MAX_BONES {
            return Err(SkirmishError::InvalidSkeleton(format!(
                "skeleton has {} bones, the maximum is {}",
                count, MAX_BONES
            )));
        }
        if parents.len() != count || bind_pose.len() != count || inverse_bind_matrices.len() != count
        {
            return Err(SkirmishError::InvalidSkeleton(format!(
                "{} bones but {} parents, {} bind poses, {} inverse bind matrices",
                count,
                parents.len(),
                bind_pose.len(),
                inverse_bind_matrices.len()
            )));
        }
        validate_hierarchy(&parents)?;

        Ok(Self {
            bone_names,
            parents,
            bind_pose,
            inverse_bind_matrices,
        })
    }

    pub fn bone_count(&self) -> usize {
        self.bone_names.len()
    }

    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.bone_names.iter().position(|n| n == name)
    }

    /// Compose local poses into world matrices, root to leaf
    pub fn compute_world_transforms(&self, local_poses: &[JointPose], world: &mut [Mat4]) {
        for i in 0..self.bone_count().min(local_poses.len()).min(world.len()) {
            let local = local_poses[i].to_mat4();
            world[i] = match self.parents[i] {
                Some(parent) => mat4_mul(&world[parent], &local),
                None => local,
            };
        }
    }

    /// Skinning palette: `world[i] * inverse_bind[i]`
    pub fn compute_skin_transforms(&self, world: &[Mat4], skin: &mut [Mat4]) {
        for (i, out) in skin.iter_mut().enumerate().take(world.len()) {
            *out = mat4_mul(&world[i], &self.inverse_bind_matrices[i]);
        }
    }
}

fn validate_hierarchy(parents: &[Option<usize>]) -> Result<()> {
    for (i, parent) in parents.iter().enumerate() {
        if let Some(p) = parent {
            if *p >= i {
                return Err(SkirmishError::InvalidSkeleton(format!(
                    "bone {} has parent {}, parents must precede children",
                    i, p
                )));
            }
        }
    }
    Ok(())
}

/// Everything an `AnimationPlayer` reads: the skeleton and the clip table.
///
/// Immutable once built and shared (behind `Arc`) by every instance of a model.
#[derive(Debug, Clone)]
pub struct SkinningData {
    skeleton: Skeleton,
    clips: HashMap<String, AnimationClip>,
}

impl SkinningData {
    /// Attach clips to a skeleton, rejecting any keyframe that targets a
    /// bone the skeleton doesn't have.
    pub fn new(skeleton: Skeleton, clips: Vec<AnimationClip>) -> Result<Self> {
        let mut table = HashMap::with_capacity(clips.len());
        for clip in clips {
            if let Some(max_bone) = clip.max_bone_index() {
                if max_bone >= skeleton.bone_count() {
                    return Err(SkirmishError::InvalidSkeleton(format!(
                        "clip '{}' animates bone {} but the skeleton has {} bones",
                        clip.name(),
                        max_bone,
                        skeleton.bone_count()
                    )));
                }
            }
            if table.contains_key(clip.name()) {
                return Err(SkirmishError::InvalidSkeleton(format!(
                    "duplicate clip name '{}'",
                    clip.name()
                )));
            }
            table.insert(clip.name().to_string(), clip);
        }
        Ok(Self {
            skeleton,
            clips: table,
        })
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }

    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Clip names in sorted order
    pub fn clip_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.clips.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::Keyframe;

    fn assert_mat_eq(a: &Mat4, b: &Mat4) {
        for col in 0..4 {
            for row in 0..4 {
                assert!(
                    (a[col][row] - b[col][row]).abs() < 1e-5,
                    "m[{}][{}] = {}, expected {}",
                    col,
                    row,
                    a[col][row],
                    b[col][row]
                );
            }
        }
    }

    fn two_bone(bind: [JointPose; 2]) -> Skeleton {
        Skeleton::from_bind_pose(
            vec!["root".into(), "child".into()],
            vec![None, Some(0)],
            bind.to_vec(),
        )
        .unwrap()
    }

    #[test]
    fn identity_pose_produces_identity_matrix() {
        assert_mat_eq(&JointPose::default().to_mat4(), &MAT4_IDENTITY);
    }

    #[test]
    fn translation_pose_sets_last_column() {
        let pose = JointPose {
            translation: [3.0, 5.0, 7.0],
            ..Default::default()
        };
        assert_eq!(pose.to_mat4()[3], [3.0, 5.0, 7.0, 1.0]);
    }

    #[test]
    fn inverse_matrix_undoes_pose() {
        let half = std::f32::consts::FRAC_PI_4;
        let pose = JointPose {
            translation: [1.0, -2.0, 0.5],
            rotation: [0.0, half.sin(), 0.0, half.cos()],
            scale: [2.0, 2.0, 2.0],
        };
        let product = mat4_mul(&pose.to_mat4(), &pose.to_inverse_mat4());
        assert_mat_eq(&product, &MAT4_IDENTITY);
    }

    #[test]
    fn bind_pose_skins_to_identity() {
        let skeleton = two_bone([
            JointPose {
                translation: [1.0, 0.0, 0.0],
                ..Default::default()
            },
            JointPose {
                translation: [0.0, 2.0, 0.0],
                ..Default::default()
            },
        ]);
        let mut world = vec![MAT4_IDENTITY; 2];
        let mut skin = vec![MAT4_IDENTITY; 2];
        skeleton.compute_world_transforms(&skeleton.bind_pose, &mut world);
        skeleton.compute_skin_transforms(&world, &mut skin);

        // Child world translation accumulates the parent's
        assert!((world[1][3][0] - 1.0).abs() < 1e-5);
        assert!((world[1][3][1] - 2.0).abs() < 1e-5);
        for m in &skin {
            assert_mat_eq(m, &MAT4_IDENTITY);
        }
    }

    #[test]
    fn rejects_empty_skeleton() {
        let result = Skeleton::from_bind_pose(vec![], vec![], vec![]);
        assert!(matches!(result, Err(SkirmishError::InvalidSkeleton(_))));
    }

    #[test]
    fn rejects_too_many_bones() {
        let count = MAX_BONES + 1;
        let names = (0..count).map(|i| format!("b{}", i)).collect();
        let parents = (0..count).map(|i| i.checked_sub(1)).collect();
        let result = Skeleton::from_bind_pose(names, parents, vec![JointPose::default(); count]);
        assert!(matches!(result, Err(SkirmishError::InvalidSkeleton(_))));
    }

    #[test]
    fn rejects_child_before_parent() {
        let result = Skeleton::from_bind_pose(
            vec!["a".into(), "b".into()],
            vec![Some(1), None],
            vec![JointPose::default(); 2],
        );
        assert!(matches!(result, Err(SkirmishError::InvalidSkeleton(_))));
    }

    #[test]
    fn rejects_clip_with_unknown_bone() {
        let skeleton = two_bone([JointPose::default(); 2]);
        let clip = AnimationClip::new(
            "Broken",
            1.0,
            vec![Keyframe {
                bone: 5,
                time: 0.0,
                pose: JointPose::default(),
            }],
        )
        .unwrap();
        let result = SkinningData::new(skeleton, vec![clip]);
        assert!(matches!(result, Err(SkirmishError::InvalidSkeleton(_))));
    }

    #[test]
    fn clip_table_lookup() {
        let skeleton = two_bone([JointPose::default(); 2]);
        let clip = AnimationClip::new(
            "Waiting",
            1.0,
            vec![Keyframe {
                bone: 1,
                time: 0.0,
                pose: JointPose::default(),
            }],
        )
        .unwrap();
        let data = SkinningData::new(skeleton, vec![clip]).unwrap();
        assert!(data.has_clip("Waiting"));
        assert!(data.clip("Walking").is_none());
        assert_eq!(data.clip_names(), vec!["Waiting"]);
        assert_eq!(data.skeleton().bone_index("child"), Some(1));
    }
}
