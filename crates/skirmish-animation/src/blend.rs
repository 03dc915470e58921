//! Pose blending utilities
//!
//! Translation and scale blend component-wise, rotation uses shortest-path
//! quaternion slerp. Naive lerp of rotations pops visibly at keyframe
//! boundaries, so every rotation blend in the crate goes through `quat_slerp`.

use crate::skeleton::JointPose;

/// Interpolate between two poses. `t` of 0.0 = `a`, 1.0 = `b`.
pub fn lerp_pose(a: &JointPose, b: &JointPose, t: f32) -> JointPose {
    JointPose {
        translation: lerp3(&a.translation, &b.translation, t),
        rotation: quat_slerp(&a.rotation, &b.rotation, t),
        scale: lerp3(&a.scale, &b.scale, t),
    }
}

/// Blend two full pose arrays into `out`, weight clamped to [0, 1].
pub fn blend_poses(a: &[JointPose], b: &[JointPose], weight: f32, out: &mut [JointPose]) {
    let w = weight.clamp(0.0, 1.0);
    for ((pa, pb), po) in a.iter().zip(b.iter()).zip(out.iter_mut()) {
        *po = lerp_pose(pa, pb, w);
    }
}

fn lerp3(a: &[f32; 3], b: &[f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Quaternion slerp (xyzw) with shortest-path correction. The result is normalized.
pub fn quat_slerp(a: &[f32; 4], b: &[f32; 4], t: f32) -> [f32; 4] {
    let mut dot = a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3];

    // Shortest path: if dot < 0, negate b
    let mut b_adj = *b;
    if dot < 0.0 {
        b_adj = [-b[0], -b[1], -b[2], -b[3]];
        dot = -dot;
    }

    // Nearly parallel: lerp avoids dividing by sin(theta) ~ 0
    let (wa, wb) = if dot > 0.9995 {
        (1.0 - t, t)
    } else {
        let theta = dot.acos();
        let sin_theta = theta.sin();
        (
            ((1.0 - t) * theta).sin() / sin_theta,
            (t * theta).sin() / sin_theta,
        )
    };

    quat_normalize(&[
        a[0] * wa + b_adj[0] * wb,
        a[1] * wa + b_adj[1] * wb,
        a[2] * wa + b_adj[2] * wb,
        a[3] * wa + b_adj[3] * wb,
    ])
}

fn quat_normalize(q: &[f32; 4]) -> [f32; 4] {
    let len = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
    if len < 1e-10 {
        return [0.0, 0.0, 0.0, 1.0];
    }
    [q[0] / len, q[1] / len, q[2] / len, q[3] / len]
}
