//! Skirmish CLI - headless encounter runner for the enemy state machine

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{inspect, simulate};
use env_logger::Env;

#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Run enemy encounters and inspect animated models", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a fixed-step encounter and log every state transition
    Simulate {
        /// Path to a game config file
        #[arg(long)]
        config: Option<String>,

        /// Path to the enemy model (.model.toml)
        #[arg(long)]
        model: String,

        /// Simulated seconds to run
        #[arg(long, default_value = "10")]
        seconds: f64,

        /// Encounter script with spawns and timed events
        #[arg(long)]
        script: Option<String>,

        /// Frames per second fed to the clock
        #[arg(long, default_value = "30")]
        frame_rate: f64,
    },

    /// Validate a model and list its bones and clips
    Inspect {
        /// Path to the model (.model.toml)
        model: String,
    },
}

fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().filter_or("SKIRMISH_LOG", "info"));

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            model,
            seconds,
            script,
            frame_rate,
        } => simulate::run(simulate::SimulateArgs {
            config,
            model,
            seconds,
            script,
            frame_rate,
        }),
        Commands::Inspect { model } => inspect::run(&model),
    }
}
