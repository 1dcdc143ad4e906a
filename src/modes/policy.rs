//! Action selection for automated play

use crate::env::SnakeEnvironment;
use crate::game::{CellState, Direction, Position};
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Chooses the next discrete action for an environment
pub trait Policy {
    fn select_action(&mut self, env: &SnakeEnvironment) -> usize;
}

/// Uniformly random actions
pub struct RandomPolicy {
    rng: SmallRng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seed
                .map(SmallRng::seed_from_u64)
                .unwrap_or_else(SmallRng::from_entropy),
        }
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, env: &SnakeEnvironment) -> usize {
        self.rng.gen_range(0..env.action_count())
    }
}

/// Heads for the fruit along the shortest axis-aligned route, skipping
/// moves that end the game immediately
#[derive(Debug, Default)]
pub struct GreedyPolicy;

impl Policy for GreedyPolicy {
    fn select_action(&mut self, env: &SnakeEnvironment) -> usize {
        let game = env.game();
        let head = game.head();
        let tail = game.tail();
        let fruit = game.fruit_position();
        let ndim = game.level().ndim();

        (0..env.action_count())
            .filter_map(|action| {
                let direction = Direction::from_action(action, ndim).ok()?;
                let next = head.moved_in_direction(direction);
                let cell = game.level().get(&next).ok()?;
                let safe = match cell {
                    CellState::Empty | CellState::Fruit => true,
                    CellState::Body => next == tail,
                    CellState::Head | CellState::Wall => false,
                };
                safe.then(|| (action, fruit.as_ref().map_or(0, |f| manhattan(&next, f))))
            })
            .min_by_key(|&(_, distance)| distance)
            .map(|(action, _)| action)
            .unwrap_or(0)
    }
}

fn manhattan(a: &Position, b: &Position) -> u64 {
    a.components()
        .iter()
        .zip(b.components())
        .map(|(x, y)| x.abs_diff(*y))
        .sum()
}
