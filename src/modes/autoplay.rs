//! Automated play in the RL environment
//!
//! Runs whole episodes with a fixed [`Policy`], optionally paced by a tick
//! interval, and keeps [`EpisodeStats`] for the run.

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::info;

use super::policy::{GreedyPolicy, Policy, RandomPolicy};
use crate::env::{EnvConfig, SnakeEnvironment};
use crate::game::GameStatus;
use crate::metrics::{EpisodeOutcome, EpisodeStats};
use crate::replay::Replay;

/// Which built-in policy drives the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Random,
    Greedy,
}

/// Configuration for autoplay mode
#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    /// Number of episodes to play
    pub num_episodes: usize,

    /// Delay between turns; unpaced when unset
    pub tick: Option<Duration>,

    /// Log a progress line every N episodes
    pub log_frequency: usize,

    pub policy: PolicyKind,

    /// Keep a [`Replay`] of every finished episode
    pub record_replays: bool,

    pub env_config: EnvConfig,
}

impl AutoplayConfig {
    pub fn new(num_episodes: usize, env_config: EnvConfig) -> Self {
        Self {
            num_episodes,
            tick: None,
            log_frequency: 10,
            policy: PolicyKind::Greedy,
            record_replays: false,
            env_config,
        }
    }
}

/// Summary of one finished episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    pub reward: f32,
    pub timesteps: u64,
    pub snake_length: usize,
    pub outcome: EpisodeOutcome,
}

pub struct AutoplayMode {
    env: SnakeEnvironment,
    policy: Box<dyn Policy + Send>,
    stats: EpisodeStats,
    replays: Vec<Replay>,
    config: AutoplayConfig,
}

impl AutoplayMode {
    pub fn new(config: AutoplayConfig) -> Result<Self> {
        let env = SnakeEnvironment::new(config.env_config.clone())
            .context("Failed to create environment")?;
        let policy: Box<dyn Policy + Send> = match config.policy {
            PolicyKind::Random => Box::new(RandomPolicy::new(config.env_config.game.seed)),
            PolicyKind::Greedy => Box::new(GreedyPolicy),
        };

        Ok(Self {
            env,
            policy,
            stats: EpisodeStats::new(100),
            replays: Vec::new(),
            config,
        })
    }

    /// Play every configured episode, stopping early on ctrl-c
    pub async fn run(&mut self) -> Result<&EpisodeStats> {
        self.print_header();
        let mut ticker = self.config.tick.map(|tick| {
            let mut ticker = interval(tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });

        for episode in 0..self.config.num_episodes {
            let summary = tokio::select! {
                summary = self.run_episode(ticker.as_mut()) => summary?,
                _ = tokio::signal::ctrl_c() => {
                    info!(episode, "interrupted");
                    break;
                }
            };
            self.record(summary);

            info!(
                episode = episode + 1,
                outcome = ?summary.outcome,
                length = summary.snake_length,
                timesteps = summary.timesteps,
                "episode finished"
            );
            if (episode + 1) % self.config.log_frequency.max(1) == 0 {
                self.print_progress(episode + 1);
            }
        }

        println!("\nFinal Statistics:");
        println!("{}", self.stats.format_summary());
        Ok(&self.stats)
    }

    /// Play one episode to termination or truncation
    pub async fn run_episode(&mut self, mut ticker: Option<&mut Interval>) -> Result<EpisodeSummary> {
        self.env.reset(None).context("Failed to reset environment")?;
        let mut replay = self
            .config
            .record_replays
            .then(|| Replay::new(self.env.game().level()));
        let mut reward = 0.0;

        loop {
            if let Some(ticker) = ticker.as_deref_mut() {
                ticker.tick().await;
            }
            let action = self.policy.select_action(&self.env);
            let transition = self.env.step(action).context("Failed to step environment")?;
            reward += transition.reward;
            if let Some(replay) = replay.as_mut() {
                replay.record(self.env.game().level())?;
            }

            if transition.done() {
                let outcome = match (transition.terminated, self.env.game().status()) {
                    (true, GameStatus::Won) => EpisodeOutcome::Won,
                    (true, _) => EpisodeOutcome::Lost,
                    (false, _) => EpisodeOutcome::Truncated,
                };
                if let Some(replay) = replay {
                    self.replays.push(replay);
                }
                return Ok(EpisodeSummary {
                    reward,
                    timesteps: transition.info.timestep,
                    snake_length: transition.info.snake_length,
                    outcome,
                });
            }
        }
    }

    fn record(&mut self, summary: EpisodeSummary) {
        self.stats.record_episode(
            summary.reward,
            summary.timesteps,
            summary.snake_length,
            summary.outcome,
        );
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    /// Recordings of finished episodes, oldest first
    pub fn replays(&self) -> &[Replay] {
        &self.replays
    }

    fn print_header(&self) {
        let game = &self.config.env_config.game;
        println!("{}", "=".repeat(70));
        println!("Autoplay - Ouroboros");
        println!("{}", "=".repeat(70));
        println!("Episodes: {}", self.config.num_episodes);
        println!(
            "Level: {} cells along each of {} axes",
            game.level_size, game.n_dims
        );
        println!("Policy: {:?}", self.config.policy);
        println!(
            "Truncate after {} turns without fruit",
            self.config.env_config.stagnation_limit()
        );
        println!("{}", "=".repeat(70));
        println!();
    }

    fn print_progress(&self, episode: usize) {
        println!(
            "[Episode {}/{}] {}",
            episode,
            self.config.num_episodes,
            self.stats.format_summary()
        );
    }
}
