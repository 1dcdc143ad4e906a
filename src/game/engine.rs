use super::{
    action::{Action, Direction},
    cell::CellState,
    config::GameConfig,
    error::GameError,
    level::Level,
    state::{CollisionType, GameStatus, Position},
};
use rand::{rngs::SmallRng, SeedableRng};
use std::collections::VecDeque;
use tracing::debug;

/// Optional starting conditions for a [`Game`]
#[derive(Debug, Clone, Default)]
pub struct GameOptions {
    /// Starting head position; drawn from the empty cells when unset
    pub start_position: Option<Position>,
    /// Starting direction; random axis and sign when unset
    pub start_direction: Option<Direction>,
    /// Seed for fruit placement and random starts
    pub seed: Option<u64>,
    /// Ignore direction changes that reverse onto the body
    pub reject_reversal: bool,
}

/// One snake on one level
///
/// The game owns its level exclusively. Each call to [`Game::step`] resolves
/// one turn; once the game is finished nothing mutates the level again.
#[derive(Debug, Clone)]
pub struct Game {
    level: Level,
    /// Flat cell indices, head at the front
    body: VecDeque<usize>,
    direction: Direction,
    timestep: u64,
    latest_fruit_timestep: u64,
    finished: bool,
    fruit: Option<usize>,
    collision: Option<CollisionType>,
    reject_reversal: bool,
    rng: SmallRng,
}

impl Game {
    /// Start a game on `level` with a random start position and direction
    pub fn new(level: Level) -> Result<Self, GameError> {
        Self::with_options(level, GameOptions::default())
    }

    /// Start a game on the default 9x9 level
    pub fn on_default_level() -> Result<Self, GameError> {
        Self::new(Level::default())
    }

    /// Build the level described by `config` and start a game on it
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        let level = config.build_level()?;
        Self::with_options(
            level,
            GameOptions {
                seed: config.seed,
                reject_reversal: config.reject_reversal,
                ..GameOptions::default()
            },
        )
    }

    pub fn with_options(level: Level, options: GameOptions) -> Result<Self, GameError> {
        let mut rng = options
            .seed
            .map(SmallRng::seed_from_u64)
            .unwrap_or_else(SmallRng::from_entropy);

        let start = match options.start_position {
            Some(position) => {
                let flat = level.flat_index(&position)?;
                if !level.cells()[flat].is_empty() {
                    return Err(GameError::NoSpace);
                }
                flat
            }
            None => level
                .choose_random_empty_flat(&mut rng)
                .ok_or(GameError::NoSpace)?,
        };

        let ndim = level.ndim();
        let direction = match options.start_direction {
            Some(direction) => {
                check_axis(direction, ndim)?;
                direction
            }
            None => Direction::random(ndim, &mut rng),
        };

        let mut game = Self {
            level,
            body: VecDeque::new(),
            direction,
            timestep: 0,
            latest_fruit_timestep: 0,
            finished: false,
            fruit: None,
            collision: None,
            reject_reversal: options.reject_reversal,
            rng,
        };
        game.level.set_flat(start, CellState::Head);
        game.body.push_front(start);
        game.spawn_fruit();

        debug!(
            shape = ?game.level.shape(),
            start = ?game.head(),
            direction = ?game.direction,
            "game started"
        );
        Ok(game)
    }

    /// Replace the current direction
    ///
    /// Reversals are accepted unless the game was created with
    /// `reject_reversal`; moving back onto the body is then caught by the
    /// collision check of the next step.
    pub fn change_direction(&mut self, direction: Direction) -> Result<(), GameError> {
        check_axis(direction, self.level.ndim())?;
        if self.reject_reversal && self.body.len() > 1 && self.direction.is_opposite(direction) {
            return Ok(());
        }
        self.direction = direction;
        Ok(())
    }

    /// Apply an action and advance one turn. Returns whether a fruit was eaten.
    pub fn apply(&mut self, action: Action) -> Result<bool, GameError> {
        if let Action::Move(direction) = action {
            self.change_direction(direction)?;
        }
        Ok(self.step())
    }

    /// Advance the snake one turn. Returns whether a fruit was eaten.
    ///
    /// Stepping a finished game is a no-op that returns `false` and leaves
    /// the timestep alone.
    pub fn step(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.timestep += 1;

        let new_head = self.head().moved_in_direction(self.direction);
        let target = match self.level.flat_index(&new_head) {
            Ok(flat) => flat,
            Err(_) => {
                self.lose(CollisionType::OutOfBounds);
                return false;
            }
        };

        // The tail is checked as of the start of the turn: it vacates unless
        // a fruit is eaten, and a fruit cell is never part of the body.
        let cell = self.level.cells()[target];
        match cell {
            CellState::Wall => {
                self.lose(CollisionType::Wall);
                false
            }
            CellState::Body if Some(&target) != self.body.back() => {
                self.lose(CollisionType::SelfCollision);
                false
            }
            CellState::Fruit => {
                self.advance_head(target);
                self.latest_fruit_timestep = self.timestep;
                self.fruit = None;
                debug!(
                    timestep = self.timestep,
                    length = self.body.len(),
                    "fruit eaten"
                );
                self.spawn_fruit();
                true
            }
            CellState::Empty | CellState::Body | CellState::Head => {
                if let Some(tail) = self.body.pop_back() {
                    self.level.set_flat(tail, CellState::Empty);
                }
                self.advance_head(target);
                false
            }
        }
    }

    fn advance_head(&mut self, target: usize) {
        if let Some(&old_head) = self.body.front() {
            self.level.set_flat(old_head, CellState::Body);
        }
        self.level.set_flat(target, CellState::Head);
        self.body.push_front(target);
    }

    fn lose(&mut self, collision: CollisionType) {
        self.finished = true;
        self.collision = Some(collision);
        debug!(timestep = self.timestep, ?collision, "game lost");
    }

    /// Place a fruit on a random empty cell, finishing the game if none is left
    fn spawn_fruit(&mut self) {
        if self.finished {
            return;
        }
        debug_assert!(self.fruit.is_none(), "a fruit is already on the level");
        match self.level.choose_random_empty_flat(&mut self.rng) {
            Some(flat) => {
                self.level.set_flat(flat, CellState::Fruit);
                self.fruit = Some(flat);
            }
            None => {
                self.finished = true;
                self.fruit = None;
                debug!(timestep = self.timestep, length = self.body.len(), "board full");
            }
        }
    }

    /// True once the game is over and no empty cell remains
    pub fn is_won(&self) -> bool {
        self.finished && self.level.empty_count() == 0
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn status(&self) -> GameStatus {
        if !self.finished {
            GameStatus::Playing
        } else if self.is_won() {
            GameStatus::Won
        } else {
            GameStatus::Lost
        }
    }

    /// What the snake ran into, if the game was lost by collision
    pub fn last_collision(&self) -> Option<CollisionType> {
        self.collision
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn head(&self) -> Position {
        self.level.unravel(self.body[0])
    }

    pub fn tail(&self) -> Position {
        self.level.unravel(self.body[self.body.len() - 1])
    }

    /// Body positions from head to tail
    pub fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().map(|&flat| self.level.unravel(flat))
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn timestep(&self) -> u64 {
        self.timestep
    }

    pub fn latest_fruit_timestep(&self) -> u64 {
        self.latest_fruit_timestep
    }

    /// Turns since the last fruit was eaten (or since the start)
    pub fn stagnation(&self) -> u64 {
        self.timestep - self.latest_fruit_timestep
    }

    /// Number of cells the snake occupies
    pub fn snake_length(&self) -> usize {
        self.body.len()
    }

    pub fn fruit_position(&self) -> Option<Position> {
        self.fruit.map(|flat| self.level.unravel(flat))
    }
}

fn check_axis(direction: Direction, ndim: usize) -> Result<(), GameError> {
    if direction.axis >= ndim {
        return Err(GameError::DimensionMismatch {
            expected: ndim,
            actual: direction.axis + 1,
        });
    }
    Ok(())
}
