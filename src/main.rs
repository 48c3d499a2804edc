use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use handheld_snake::game::GameConfig;
use handheld_snake::modes::HumanMode;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "handheld_snake")]
#[command(version, about = "Snake for a 128x64 handheld, emulated in the terminal")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON game configuration; missing fields use the handheld defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (the terminal is taken by the game screen)
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with the keyboard standing in for the keypad
    Human,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    info!("starting with {:?}", config);

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config);
            if let Some(seed) = cli.seed {
                human_mode = human_mode.with_seed(seed);
            }
            human_mode.run()?;
        }
    }

    Ok(())
}
