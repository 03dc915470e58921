//! Per-enemy state machine driver

use crate::audio::SoundCue;
use crate::entity::{Enemy, Player};
use crate::scene::Scene;
use crate::state::EnemyState;
use skirmish_core::Result;

/// Drives one enemy through its behavior states.
///
/// The context owns the enemy and its state history. The player and the
/// scene are borrowed for the duration of each `update`, since every enemy
/// reads them and none may hold on to them.
#[derive(Debug)]
pub struct EnemyContext {
    current: EnemyState,
    previous: Option<EnemyState>,
    enemy: Enemy,
    cues: Vec<SoundCue>,
    transitions: u64,
}

impl EnemyContext {
    /// Take ownership of `enemy` and enter `initial`, configuring its model
    pub fn new(enemy: Enemy, initial: EnemyState) -> Result<Self> {
        let mut ctx = Self {
            current: initial,
            previous: None,
            enemy,
            cues: Vec::new(),
            transitions: 0,
        };
        initial.start_animation(&mut ctx)?;
        log::debug!("Enemy {} spawned in {}", ctx.enemy.id, initial);
        Ok(ctx)
    }

    /// Switch to `new_state`. Does nothing if it is already the current state.
    pub fn change_state(&mut self, new_state: EnemyState) -> Result<()> {
        if new_state == self.current {
            return Ok(());
        }

        log::info!("Enemy {}: {} -> {}", self.enemy.id, self.current, new_state);
        self.previous = Some(self.current);
        self.current = new_state;
        self.transitions += 1;
        new_state.start_animation(self).inspect_err(|e| {
            log::error!(
                "Enemy {} failed to enter {}: {}",
                self.enemy.id,
                new_state,
                e
            )
        })
    }

    /// Run the current state's per-tick behavior
    pub fn update(&mut self, player: &Player, scene: &Scene) -> Result<()> {
        self.current.handle(self, player, scene)
    }

    pub fn current_state(&self) -> EnemyState {
        self.current
    }

    /// The state active before the last transition, if any
    pub fn previous_state(&self) -> Option<EnemyState> {
        self.previous
    }

    /// Number of transitions since spawn
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn enemy_mut(&mut self) -> &mut Enemy {
        &mut self.enemy
    }

    pub(crate) fn emit(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    /// Take the sound cues raised since the last drain
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::grunt_skinning;
    use skirmish_animation::{AnimationClip, JointPose, Keyframe, Skeleton, SkinningData};
    use skirmish_core::{SkirmishError, Vec2, Vec3};
    use std::sync::Arc;

    fn grunt() -> Enemy {
        Enemy::new(Vec3::ZERO, Vec2::new(2.0, 0.0), 3.0, grunt_skinning())
    }

    #[test]
    fn new_configures_initial_state() {
        let ctx = EnemyContext::new(grunt(), EnemyState::Inactive).unwrap();
        assert_eq!(ctx.current_state(), EnemyState::Inactive);
        assert_eq!(ctx.previous_state(), None);
        assert_eq!(ctx.transition_count(), 0);
        assert_eq!(ctx.enemy().model.animation.current_clip(), Some("Waiting"));
    }

    #[test]
    fn change_state_records_previous() {
        let mut ctx = EnemyContext::new(grunt(), EnemyState::Inactive).unwrap();
        ctx.change_state(EnemyState::Following).unwrap();
        assert_eq!(ctx.current_state(), EnemyState::Following);
        assert_eq!(ctx.previous_state(), Some(EnemyState::Inactive));

        ctx.change_state(EnemyState::Attacking).unwrap();
        assert_eq!(ctx.previous_state(), Some(EnemyState::Following));
        assert_eq!(ctx.transition_count(), 2);
    }

    #[test]
    fn change_to_current_state_is_a_no_op() {
        let mut ctx = EnemyContext::new(grunt(), EnemyState::Inactive).unwrap();
        ctx.change_state(EnemyState::Following).unwrap();
        ctx.drain_cues();
        ctx.enemy_mut().model.advance(0.5).unwrap();
        let position = ctx.enemy().model.animation.position();

        ctx.change_state(EnemyState::Following).unwrap();

        assert_eq!(ctx.transition_count(), 1);
        assert_eq!(ctx.previous_state(), Some(EnemyState::Inactive));
        // The clip was not restarted and no second alert was raised
        assert_eq!(ctx.enemy().model.animation.position(), position);
        assert!(ctx.drain_cues().is_empty());
    }

    #[test]
    fn missing_clip_propagates() {
        let skeleton = Skeleton::from_bind_pose(
            vec!["root".into()],
            vec![None],
            vec![JointPose::default()],
        )
        .unwrap();
        let waiting = AnimationClip::new(
            "Waiting",
            1.0,
            vec![Keyframe {
                bone: 0,
                time: 0.0,
                pose: JointPose::default(),
            }],
        )
        .unwrap();
        let skinning = Arc::new(SkinningData::new(skeleton, vec![waiting]).unwrap());
        let enemy = Enemy::new(Vec3::ZERO, Vec2::new(1.0, 0.0), 1.0, skinning);

        let mut ctx = EnemyContext::new(enemy, EnemyState::Inactive).unwrap();
        let err = ctx.change_state(EnemyState::Following).unwrap_err();
        assert!(matches!(err, SkirmishError::ClipNotFound(ref n) if n == "Walking"));
        // The model keeps playing the old clip at the old speed
        assert_eq!(ctx.enemy().model.animation.current_clip(), Some("Waiting"));
        assert_eq!(ctx.enemy().model.time_speed, 0.25);

        let err = EnemyContext::new(grunt_without("WakingUp"), EnemyState::WakeUp).unwrap_err();
        assert!(matches!(err, SkirmishError::ClipNotFound(_)));
    }

    fn grunt_without(clip: &str) -> Enemy {
        let full = grunt_skinning();
        let clips = full
            .clip_names()
            .into_iter()
            .filter(|name| *name != clip)
            .filter_map(|name| full.clip(name).cloned())
            .collect();
        let skinning = SkinningData::new(full.skeleton().clone(), clips).unwrap();
        Enemy::new(Vec3::ZERO, Vec2::new(2.0, 0.0), 3.0, Arc::new(skinning))
    }
}
