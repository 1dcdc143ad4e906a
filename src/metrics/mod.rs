pub mod episode_stats;
pub mod game_metrics;

pub use episode_stats::{EpisodeOutcome, EpisodeStats};
pub use game_metrics::GameMetrics;
