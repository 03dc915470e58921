//! Animation system for Skirmish
//!
//! Provides two tiers of animation:
//! - **Skeletal playback**: `AnimationPlayer` plays one named keyframe clip
//!   against a shared skeleton, producing bone-local, world, and skinning transforms
//! - **Transform tweens**: `TransformTween` lerps a whole object transform
//!   between two endpoints, optionally looping

pub mod blend;
pub mod clip;
pub mod loader;
pub mod player;
pub mod sampler;
pub mod skeleton;
pub mod tween;

pub use clip::{AnimationClip, Interpolation, Keyframe};
pub use loader::{load_model_from_file, load_model_from_str};
pub use player::AnimationPlayer;
pub use skeleton::{JointPose, Skeleton, SkinningData, MAX_BONES};
pub use tween::TransformTween;
