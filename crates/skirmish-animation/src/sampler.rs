//! Per-bone keyframe evaluation: binary search for the bracketing pair, then interpolate

use crate::blend::lerp_pose;
use crate::clip::{AnimationClip, Interpolation};
use crate::skeleton::JointPose;

/// Sample one bone of a clip at `time`.
///
/// Returns `None` if the clip has no keyframes for the bone. Times before the
/// bone's first key hold the first key; times past its last key hold the last
/// key (no extrapolation).
pub fn sample_bone(clip: &AnimationClip, bone: usize, time: f64) -> Option<JointPose> {
    let indices = clip.bone_key_indices(bone);
    let keyframes = clip.keyframes();

    let first = &keyframes[*indices.first()?];
    if time <= first.time {
        return Some(first.pose);
    }

    let last = &keyframes[*indices.last()?];
    if time >= last.time {
        return Some(last.pose);
    }

    // First key strictly after `time`; guaranteed in 1..len by the clamps above
    let next_pos = indices.partition_point(|&i| keyframes[i].time <= time);
    let prev = &keyframes[indices[next_pos - 1]];
    let next = &keyframes[indices[next_pos]];

    let span = next.time - prev.time;
    if span <= 0.0 {
        return Some(prev.pose);
    }
    let t = ((time - prev.time) / span) as f32;

    match clip.interpolation() {
        Interpolation::Step => Some(prev.pose),
        Interpolation::Linear => Some(lerp_pose(&prev.pose, &next.pose, t)),
    }
}

/// Sample every bone of a clip into `poses`. Bones without keys get `rest`.
pub fn sample_clip(clip: &AnimationClip, time: f64, rest: &[JointPose], poses: &mut [JointPose]) {
    for (bone, pose) in poses.iter_mut().enumerate() {
        *pose = match sample_bone(clip, bone, time) {
            Some(sampled) => sampled,
            None => rest.get(bone).copied().unwrap_or_default(),
        };
    }
}
