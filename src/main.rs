use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ouroboros::env::EnvConfig;
use ouroboros::game::GameConfig;
use ouroboros::modes::{AutoplayConfig, AutoplayMode, InteractiveMode, PolicyKind};
use ouroboros::replay::save_replays;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ouroboros")]
#[command(version, about = "N-dimensional snake")]
struct Cli {
    /// How to drive the game
    #[arg(long, default_value = "autoplay")]
    mode: Mode,

    /// Cells along each axis
    #[arg(long, default_value = "9")]
    size: usize,

    /// Number of axes
    #[arg(long, default_value = "2")]
    dims: usize,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// JSON game config; overrides --size, --dims and --seed
    #[arg(long)]
    config: Option<PathBuf>,

    /// Episodes to play in autoplay mode
    #[arg(long, default_value = "10")]
    episodes: usize,

    /// Milliseconds between autoplay turns (0 = as fast as possible)
    #[arg(long, default_value = "0")]
    tick_ms: u64,

    /// Autoplay policy
    #[arg(long, default_value = "greedy")]
    policy: PolicyArg,

    /// Write a JSON replay of every autoplay episode to this file
    #[arg(long)]
    replay: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play episodes automatically and report statistics
    Autoplay,
    /// Read moves from stdin, write JSON state updates to stdout
    Interactive,
}

#[derive(Clone, ValueEnum)]
enum PolicyArg {
    Random,
    Greedy,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let game_config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => {
            let config = GameConfig {
                seed: cli.seed,
                ..GameConfig::new(cli.size, cli.dims)
            };
            config.validate().map_err(anyhow::Error::msg)?;
            config
        }
    };

    match cli.mode {
        Mode::Autoplay => {
            let mut config = AutoplayConfig::new(
                cli.episodes,
                EnvConfig {
                    game: game_config,
                    ..Default::default()
                },
            );
            config.tick = (cli.tick_ms > 0).then(|| Duration::from_millis(cli.tick_ms));
            config.policy = match cli.policy {
                PolicyArg::Random => PolicyKind::Random,
                PolicyArg::Greedy => PolicyKind::Greedy,
            };
            config.record_replays = cli.replay.is_some();
            let mut autoplay = AutoplayMode::new(config)?;
            autoplay.run().await.context("Autoplay failed")?;
            if let Some(path) = &cli.replay {
                save_replays(autoplay.replays(), path)?;
                tracing::info!(path = ?path, episodes = autoplay.replays().len(), "replays saved");
            }
        }
        Mode::Interactive => {
            let mut interactive = InteractiveMode::new(game_config)?;
            interactive.run().await?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
