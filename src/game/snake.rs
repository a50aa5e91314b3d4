//! Snake session

use serde::{Deserialize, Serialize};

use super::SeedStream;
use crate::consts::SNAKE_TICK_MS;
use crate::error::Result;
use crate::schedule::{Generation, Handled, Simulation, Step, Wake};
use crate::settings::Settings;
use crate::sim::{Direction, SnakeSnapshot, SnakeState, SnakeStep};

/// Snake input events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeInput {
    RequestDirection(Direction),
    Restart,
}

#[derive(Debug, Clone)]
pub struct SnakeSession {
    state: SnakeState,
    seeds: SeedStream,
    generation: Generation,
    tick_ms: u64,
}

impl SnakeSession {
    pub fn new(seed: u64) -> Self {
        let mut seeds = SeedStream::new(seed);
        let state = SnakeState::new(seeds.next_seed());
        Self {
            state,
            seeds,
            generation: 0,
            tick_ms: SNAKE_TICK_MS,
        }
    }

    pub fn from_settings(settings: &Settings, seed: u64) -> Self {
        let mut session = Self::new(seed);
        session.tick_ms = settings.snake_tick_ms.max(1);
        session
    }

    /// Start from a prepared state, e.g. one built with `SnakeState::from_parts`
    pub fn with_state(state: SnakeState, seed: u64) -> Self {
        let mut session = Self::new(seed);
        session.state = state;
        session
    }

    pub fn state(&self) -> &SnakeState {
        &self.state
    }
}

impl Simulation for SnakeSession {
    type Input = SnakeInput;
    type Snapshot = SnakeSnapshot;

    fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    fn generation(&self) -> Generation {
        self.generation
    }

    fn handle(&mut self, input: SnakeInput) -> Result<Handled> {
        let handled = match input {
            // Takes effect on the next tick
            SnakeInput::RequestDirection(direction) => {
                if self.state.set_pending_direction(direction) {
                    Handled::Buffered
                } else {
                    Handled::Ignored
                }
            }
            SnakeInput::Restart => {
                self.generation += 1;
                self.state = SnakeState::new(self.seeds.next_seed());
                log::info!("Snake restarted (generation {})", self.generation);
                Handled::Reset
            }
        };
        Ok(handled)
    }

    fn step(&mut self) -> Step {
        match self.state.step() {
            SnakeStep::Idle => Step::IDLE,
            SnakeStep::Moved | SnakeStep::Ate | SnakeStep::Over(_) => Step::REDRAW,
        }
    }

    fn resume(&mut self, wake: Wake) -> bool {
        log::debug!("Snake has no continuations, ignoring {:?}", wake);
        false
    }

    fn snapshot(&self) -> SnakeSnapshot {
        self.state.snapshot()
    }
}
