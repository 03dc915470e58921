//! Simulate command: run a scripted encounter headlessly

use super::script::{Encounter, ScriptAction, ScriptEvent};
use anyhow::{bail, Context, Result};
use skirmish_animation::load_model_from_file;
use skirmish_core::{EntityId, GameConfig, Vec2, Vec3};
use skirmish_enemy::{AudioCommand, Enemy, EnemySystem, Level, Player, Scene};
use skirmish_runtime::{GameClock, RuntimeSystem};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

pub struct SimulateArgs {
    pub config: Option<String>,
    pub model: String,
    pub seconds: f64,
    pub script: Option<String>,
    pub frame_rate: f64,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        bail!("--seconds must be positive, got {}", args.seconds);
    }
    if !(args.frame_rate.is_finite() && args.frame_rate > 0.0) {
        bail!("--frame-rate must be positive, got {}", args.frame_rate);
    }

    let config =
        GameConfig::load(args.config.as_deref().map(Path::new)).context("Failed to load config")?;
    let skinning = Arc::new(
        load_model_from_file(Path::new(&args.model))
            .with_context(|| format!("Failed to load model {}", args.model))?,
    );
    let encounter = match &args.script {
        Some(path) => Encounter::load(Path::new(path))?,
        None => Encounter::default(),
    };

    let scene = Scene::from_config(&config.scene);
    let mut player = Player::at(Vec3::new(encounter.player.x, config.scene.ground_y, 0.0));
    player.speed = Vec2::new(encounter.player.speed, 0.0);
    let mut level = Level::new(player, scene);

    let mut ids = Vec::with_capacity(encounter.enemies.len());
    for spawn in &encounter.enemies {
        let enemy = Enemy::from_config(
            &config.enemy,
            Vec3::new(spawn.x, config.scene.ground_y, 0.0),
            skinning.clone(),
        );
        let id = level.spawn(enemy, spawn.initial_state()?)?;
        ids.push(id);
    }

    println!(
        "Simulating {} enemies for {}s at {} Hz",
        ids.len(),
        args.seconds,
        config.simulation.fixed_hz
    );

    let mut system = EnemySystem::from_config(&config.enemy, &config.audio);
    system.initialize(&mut level)?;

    let mut clock = GameClock::with_fixed_timestep(config.simulation.fixed_hz);
    let frame_time = 1.0 / args.frame_rate;
    let mut pending: VecDeque<ScriptEvent> = encounter.events.into();
    let mut sim_time = 0.0;

    while sim_time < args.seconds {
        clock.advance(frame_time);
        while let Some(dt) = clock.next_fixed_step() {
            while pending.front().is_some_and(|event| event.at <= sim_time) {
                if let Some(event) = pending.pop_front() {
                    apply(&mut level, &ids, &event)?;
                }
            }

            level.player.advance(dt, &level.scene);
            system.fixed_update(&mut level, dt)?;
            sim_time += dt;

            for command in system.drain_audio() {
                report_audio(sim_time, &command);
            }
        }
        system.update(&mut level, clock.delta_time)?;
    }

    system.shutdown()?;

    println!();
    println!("After {:.2}s (player at x={:.2}):", sim_time, level.player.position.x);
    for ctx in level.enemies() {
        let enemy = ctx.enemy();
        println!(
            "  Enemy {}: {} at x={:.2}, facing {}, health {}, {} transitions",
            enemy.id,
            ctx.current_state(),
            enemy.position.x,
            enemy.direction(),
            enemy.health,
            ctx.transition_count()
        );
    }

    Ok(())
}

fn apply(level: &mut Level, ids: &[EntityId], event: &ScriptEvent) -> Result<()> {
    log::debug!("Script at {}s: {:?}", event.at, event.action);
    match event.action {
        ScriptAction::Damage { enemy, amount } => level.damage(ids[enemy], amount)?,
        ScriptAction::Stun { enemy } => level.stun(ids[enemy])?,
        ScriptAction::Revive { enemy } => level.revive(ids[enemy])?,
        ScriptAction::MovePlayer { x, speed } => {
            if let Some(x) = x {
                level.player.position.x = x;
            }
            if let Some(speed) = speed {
                level.player.speed.x = speed;
            }
        }
    }
    Ok(())
}

fn report_audio(time: f64, command: &AudioCommand) {
    match command {
        AudioCommand::Play {
            sound,
            position,
            volume,
        } => match position {
            Some(pos) => log::info!(
                "[{:.2}s] play '{}' at x={:.2} (volume {})",
                time,
                sound,
                pos.x,
                volume
            ),
            None => log::info!("[{:.2}s] play '{}' (volume {})", time, sound, volume),
        },
    }
}
