//! Model inspection command

use anyhow::{Context, Result};
use skirmish_animation::{load_model_from_file, SkinningData};
use skirmish_enemy::EnemyState;
use std::path::Path;

pub fn run(model: &str) -> Result<()> {
    let path = Path::new(model);
    if !path.exists() {
        anyhow::bail!("Model not found: {}", model);
    }

    let data = load_model_from_file(path).context("Failed to load model")?;
    let skeleton = data.skeleton();

    println!("Model: {}", path.display());
    println!();
    println!("Bones ({}):", skeleton.bone_count());
    for (i, name) in skeleton.bone_names.iter().enumerate() {
        match skeleton.parents[i] {
            Some(parent) => println!("  [{}] {} <- {}", i, name, skeleton.bone_names[parent]),
            None => println!("  [{}] {} (root)", i, name),
        }
    }

    println!();
    println!("Clips ({}):", data.clip_count());
    for name in data.clip_names() {
        if let Some(clip) = data.clip(name) {
            println!(
                "  {} : {:.2}s, {} keyframes, {:?}",
                name,
                clip.duration(),
                clip.keyframes().len(),
                clip.interpolation()
            );
        }
    }

    let missing = missing_clips(&data);
    println!();
    if missing.is_empty() {
        println!("All enemy state clips present.");
    } else {
        println!("Missing clips for enemy states:");
        for (state, clip) in &missing {
            println!("  {} needs '{}'", state, clip);
        }
    }

    Ok(())
}

/// States whose entry clip the model does not provide
fn missing_clips(data: &SkinningData) -> Vec<(EnemyState, &'static str)> {
    EnemyState::ALL
        .into_iter()
        .map(|state| (state, state.clip().0))
        .filter(|(_, clip)| !data.has_clip(clip))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_animation::load_model_from_str;

    #[test]
    fn reports_missing_state_clips() {
        let toml_str = r#"
[[bones]]
name = "root"

[[clips]]
name = "Waiting"
duration = 1.0

[[clips.keyframes]]
bone = "root"
time = 0.0

[[clips]]
name = "Dying"
duration = 1.0

[[clips.keyframes]]
bone = "root"
time = 0.0
"#;
        let data = load_model_from_str(toml_str, Path::new("partial.model.toml")).unwrap();
        let missing: Vec<EnemyState> = missing_clips(&data).into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            missing,
            vec![
                EnemyState::Following,
                EnemyState::Attacking,
                EnemyState::Attacked,
                EnemyState::WakeUp,
            ]
        );
    }
}
