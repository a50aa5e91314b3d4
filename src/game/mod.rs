//! Game sessions
//!
//! A session owns one game's state, binds the game's input vocabulary to it and
//! implements [`Simulation`](crate::schedule::Simulation) so the scheduler can
//! drive it. Resets replace the state wholesale under a new generation.

pub mod minesweeper;
pub mod pong;
pub mod snake;

pub use minesweeper::{BoardInput, MinesweeperSession};
pub use pong::{PongInput, PongSession};
pub use snake::{SnakeInput, SnakeSession};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Per-session source of per-generation state seeds
#[derive(Debug, Clone)]
pub(crate) struct SeedStream {
    rng: Pcg32,
}

impl SeedStream {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub(crate) fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }
}
