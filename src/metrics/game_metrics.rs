use std::time::{Duration, Instant};

/// Per-session counters for an interactive front end
pub struct GameMetrics {
    /// When the session began; restarts do not move it
    pub start_time: Instant,
    pub game_start_time: Instant,
    /// Session time as of the last [`GameMetrics::update`]
    pub elapsed_time: Duration,
    pub best_length: usize,
    pub games_played: u32,
    pub games_won: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            game_start_time: now,
            elapsed_time: Duration::ZERO,
            best_length: 0,
            games_played: 0,
            games_won: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.game_start_time = Instant::now();
    }

    /// Time spent in the current game
    pub fn game_time(&self) -> Duration {
        self.game_start_time.elapsed()
    }

    pub fn on_game_over(&mut self, final_length: usize, won: bool) {
        self.games_played += 1;
        if won {
            self.games_won += 1;
        }
        if final_length > self.best_length {
            self.best_length = final_length;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
