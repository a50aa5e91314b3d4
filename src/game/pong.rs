//! Pong session
//!
//! After a point the ball is re-served and held at centre. The release is a
//! deferred continuation tagged with the current generation, so paddles stay
//! live during the hold and a restart cannot be released by an old point.

use serde::{Deserialize, Serialize};

use super::SeedStream;
use crate::consts::{PONG_TICK_MS, SETTLE_DELAY_MS};
use crate::error::Result;
use crate::schedule::{Deferred, Generation, Handled, Simulation, Step, Wake};
use crate::settings::Settings;
use crate::sim::{PaddleMove, Player, PongSnapshot, PongState, PongStep};

/// Pong input events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PongInput {
    MovePaddle { player: Player, direction: PaddleMove },
    TogglePause,
    Restart,
}

#[derive(Debug, Clone)]
pub struct PongSession {
    state: PongState,
    seeds: SeedStream,
    generation: Generation,
    tick_ms: u64,
    settle_delay_ms: u64,
}

impl PongSession {
    pub fn new(seed: u64) -> Self {
        let mut seeds = SeedStream::new(seed);
        let state = PongState::new(seeds.next_seed());
        Self {
            state,
            seeds,
            generation: 0,
            tick_ms: PONG_TICK_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
        }
    }

    pub fn from_settings(settings: &Settings, seed: u64) -> Self {
        let mut session = Self::new(seed);
        session.tick_ms = settings.pong_tick_ms.max(1);
        session.settle_delay_ms = settings.settle_delay_ms;
        session
    }

    pub fn state(&self) -> &PongState {
        &self.state
    }

    /// Direct state access for setting up positions
    pub fn state_mut(&mut self) -> &mut PongState {
        &mut self.state
    }

    pub fn settle_delay_ms(&self) -> u64 {
        self.settle_delay_ms
    }
}

impl Simulation for PongSession {
    type Input = PongInput;
    type Snapshot = PongSnapshot;

    fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    fn generation(&self) -> Generation {
        self.generation
    }

    fn handle(&mut self, input: PongInput) -> Result<Handled> {
        let handled = match input {
            PongInput::MovePaddle { player, direction } => {
                if self.state.move_paddle(player, direction) {
                    Handled::Changed
                } else {
                    Handled::Ignored
                }
            }
            PongInput::TogglePause => {
                if self.state.toggle_pause() {
                    Handled::Changed
                } else {
                    Handled::Ignored
                }
            }
            PongInput::Restart => {
                self.generation += 1;
                self.state = PongState::new(self.seeds.next_seed());
                log::info!("Pong restarted (generation {})", self.generation);
                Handled::Reset
            }
        };
        Ok(handled)
    }

    fn step(&mut self) -> Step {
        match self.state.step() {
            PongStep::Idle => Step::IDLE,
            PongStep::Moved | PongStep::Won(_) => Step::REDRAW,
            PongStep::Scored(_) => Step {
                redraw: true,
                defer: Some(Deferred {
                    delay_ms: self.settle_delay_ms,
                    wake: Wake {
                        generation: self.generation,
                    },
                }),
            },
        }
    }

    fn resume(&mut self, wake: Wake) -> bool {
        if wake.generation != self.generation {
            log::debug!(
                "Ignoring settle from generation {} (now {})",
                wake.generation,
                self.generation
            );
            return false;
        }
        let released = self.state.end_settle();
        if released {
            log::trace!("Ball released");
        }
        released
    }

    fn snapshot(&self) -> PongSnapshot {
        self.state.snapshot()
    }
}
