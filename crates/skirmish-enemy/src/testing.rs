//! Shared test fixtures

use skirmish_animation::{load_model_from_str, SkinningData};
use std::path::Path;
use std::sync::Arc;

/// A two-bone grunt with every clip the behavior states ask for.
/// Durations: Waiting 2.0, Walking 1.0, RepeatAttack 0.5, Attacked 1.0,
/// Dying 1.5, WakingUp 2.0.
pub const GRUNT_MODEL: &str = r#"
name = "grunt"

[[bones]]
name = "hips"
translation = [0.0, 1.0, 0.0]

[[bones]]
name = "club"
parent = "hips"
translation = [0.5, 0.5, 0.0]

[[clips]]
name = "Waiting"
duration = 2.0

[[clips.keyframes]]
bone = "hips"
time = 0.0

[[clips.keyframes]]
bone = "hips"
time = 1.0
translation = [0.0, 1.1, 0.0]

[[clips]]
name = "Walking"
duration = 1.0

[[clips.keyframes]]
bone = "hips"
time = 0.0

[[clips.keyframes]]
bone = "hips"
time = 0.5
translation = [0.0, 1.2, 0.0]

[[clips]]
name = "RepeatAttack"
duration = 0.5

[[clips.keyframes]]
bone = "club"
time = 0.0

[[clips.keyframes]]
bone = "club"
time = 0.25
rotation = [0.0, 0.0, 0.7071068, 0.7071068]

[[clips]]
name = "Attacked"
duration = 1.0

[[clips.keyframes]]
bone = "hips"
time = 0.0

[[clips.keyframes]]
bone = "hips"
time = 1.0
translation = [-0.3, 1.0, 0.0]

[[clips]]
name = "Dying"
duration = 1.5

[[clips.keyframes]]
bone = "hips"
time = 0.0

[[clips.keyframes]]
bone = "hips"
time = 1.5
translation = [0.0, 0.1, 0.0]

[[clips]]
name = "WakingUp"
duration = 2.0

[[clips.keyframes]]
bone = "hips"
time = 0.0
translation = [0.0, 0.1, 0.0]

[[clips.keyframes]]
bone = "hips"
time = 2.0
"#;

pub fn grunt_skinning() -> Arc<SkinningData> {
    Arc::new(load_model_from_str(GRUNT_MODEL, Path::new("grunt.model.toml")).unwrap())
}
