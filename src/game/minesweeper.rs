//! Minesweeper session: board input vocabulary plus the one-second clock

use serde::{Deserialize, Serialize};

use super::SeedStream;
use crate::consts::BOARD_TICK_MS;
use crate::error::Result;
use crate::schedule::{Generation, Handled, Simulation, Step, Wake};
use crate::settings::Settings;
use crate::sim::{Board, BoardConfig, BoardSnapshot};

/// Board input events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardInput {
    /// Reveal a cell
    PrimaryActivate { row: usize, col: usize },
    /// Toggle a flag
    SecondaryActivate { row: usize, col: usize },
    NewGame,
    SetDifficulty {
        rows: usize,
        cols: usize,
        mines: usize,
    },
}

/// What `NewGame` builds
#[derive(Debug, Clone)]
enum NextBoard {
    /// Fresh board, mines laid around the first reveal
    Random(BoardConfig),
    /// The same fixed layout again
    Layout(Board),
}

#[derive(Debug, Clone)]
pub struct MinesweeperSession {
    board: Board,
    next: NextBoard,
    seeds: SeedStream,
    generation: Generation,
    tick_ms: u64,
}

impl MinesweeperSession {
    pub fn new(config: BoardConfig, seed: u64) -> Self {
        let mut seeds = SeedStream::new(seed);
        let board = Board::new(config, seeds.next_seed());
        Self {
            board,
            next: NextBoard::Random(config),
            seeds,
            generation: 0,
            tick_ms: BOARD_TICK_MS,
        }
    }

    pub fn from_settings(settings: &Settings, seed: u64) -> Result<Self> {
        let config = settings.difficulty.board_config()?;
        Ok(Self::new(config, seed).with_tick_ms(settings.board_tick_ms))
    }

    /// Play a prepared board, e.g. a fixed layout. `NewGame` deals it again
    /// as it was handed in.
    pub fn with_board(board: Board, seed: u64) -> Self {
        Self {
            next: NextBoard::Layout(board.clone()),
            board,
            seeds: SeedStream::new(seed),
            generation: 0,
            tick_ms: BOARD_TICK_MS,
        }
    }

    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms.max(1);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.board = match &self.next {
            NextBoard::Random(config) => Board::new(*config, self.seeds.next_seed()),
            NextBoard::Layout(board) => board.clone(),
        };
        let (rows, cols) = self.board.size();
        log::info!(
            "New {}x{} board with {} mines (generation {})",
            rows,
            cols,
            self.board.mine_count(),
            self.generation
        );
    }
}

impl Simulation for MinesweeperSession {
    type Input = BoardInput;
    type Snapshot = BoardSnapshot;

    fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    fn generation(&self) -> Generation {
        self.generation
    }

    fn handle(&mut self, input: BoardInput) -> Result<Handled> {
        let handled = match input {
            BoardInput::PrimaryActivate { row, col } => {
                if self.board.reveal((row, col)).has_update() {
                    Handled::Changed
                } else {
                    Handled::Ignored
                }
            }
            BoardInput::SecondaryActivate { row, col } => {
                if self.board.toggle_flag((row, col)).has_update() {
                    Handled::Changed
                } else {
                    Handled::Ignored
                }
            }
            BoardInput::NewGame => {
                self.reset();
                Handled::Reset
            }
            BoardInput::SetDifficulty { rows, cols, mines } => {
                // Validate before touching the running game
                let config = BoardConfig::new(rows, cols, mines)?;
                self.next = NextBoard::Random(config);
                self.reset();
                Handled::Reset
            }
        };
        Ok(handled)
    }

    fn step(&mut self) -> Step {
        if self.board.tick_clock() {
            log::trace!("Board clock at {}s", self.board.elapsed_secs());
            Step::REDRAW
        } else {
            Step::IDLE
        }
    }

    fn resume(&mut self, wake: Wake) -> bool {
        log::debug!("Board has no continuations, ignoring {:?}", wake);
        false
    }

    fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }
}
