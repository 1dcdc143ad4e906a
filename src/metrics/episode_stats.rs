//! Episode statistics with rolling averages

use std::collections::VecDeque;

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeOutcome {
    Won,
    Lost,
    /// Cut off for going too long without eating
    Truncated,
}

/// Episode statistics tracker with rolling averages
///
/// Keeps per-episode rewards, timesteps and final snake lengths in rolling
/// windows, plus lifetime totals.
///
/// # Example
///
/// ```rust
/// use ouroboros::metrics::{EpisodeOutcome, EpisodeStats};
///
/// let mut stats = EpisodeStats::new(100);
/// stats.record_episode(4.0, 120, 5, EpisodeOutcome::Lost);
///
/// assert_eq!(stats.total_episodes(), 1);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f32>,

    /// Episode lengths in timesteps (rolling window)
    episode_timesteps: VecDeque<u64>,

    /// Final snake lengths (rolling window)
    snake_lengths: VecDeque<usize>,

    total_episodes: usize,
    total_timesteps: u64,
    wins: usize,
    losses: usize,
    truncations: usize,
    best_length: usize,

    /// Window size for rolling averages
    window_size: usize,
}

impl EpisodeStats {
    /// Create a tracker averaging over the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_timesteps: VecDeque::with_capacity(window_size),
            snake_lengths: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_timesteps: 0,
            wins: 0,
            losses: 0,
            truncations: 0,
            best_length: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    pub fn record_episode(
        &mut self,
        reward: f32,
        timesteps: u64,
        snake_length: usize,
        outcome: EpisodeOutcome,
    ) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_timesteps, timesteps, self.window_size);
        Self::push_deque(&mut self.snake_lengths, snake_length, self.window_size);
        self.total_episodes += 1;
        self.total_timesteps += timesteps;
        self.best_length = self.best_length.max(snake_length);
        match outcome {
            EpisodeOutcome::Won => self.wins += 1,
            EpisodeOutcome::Lost => self.losses += 1,
            EpisodeOutcome::Truncated => self.truncations += 1,
        }
    }

    /// Mean episode reward over the rolling window, 0.0 when empty
    pub fn mean_episode_reward(&self) -> f32 {
        if self.episode_rewards.is_empty() {
            0.0
        } else {
            self.episode_rewards.iter().sum::<f32>() / self.episode_rewards.len() as f32
        }
    }

    pub fn mean_episode_timesteps(&self) -> f32 {
        let sum: u64 = self.episode_timesteps.iter().sum();
        if self.episode_timesteps.is_empty() {
            0.0
        } else {
            sum as f32 / self.episode_timesteps.len() as f32
        }
    }

    pub fn mean_snake_length(&self) -> f32 {
        let sum: usize = self.snake_lengths.iter().sum();
        if self.snake_lengths.is_empty() {
            0.0
        } else {
            sum as f32 / self.snake_lengths.len() as f32
        }
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_timesteps(&self) -> u64 {
        self.total_timesteps
    }

    pub fn wins(&self) -> usize {
        self.wins
    }

    pub fn losses(&self) -> usize {
        self.losses
    }

    pub fn truncations(&self) -> usize {
        self.truncations
    }

    /// Longest snake seen in any episode
    pub fn best_length(&self) -> usize {
        self.best_length
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Won: {} | Lost: {} | Truncated: {} | Reward: {:.2} | Len: {:.2} | Best: {} | Turns: {:.1}",
            self.total_episodes,
            self.total_timesteps,
            self.wins,
            self.losses,
            self.truncations,
            self.mean_episode_reward(),
            self.mean_snake_length(),
            self.best_length,
            self.mean_episode_timesteps(),
        )
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
