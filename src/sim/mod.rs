//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per scheduler tick, no wall-clock reads
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod minefield;
pub mod pong;
pub mod snake;

pub use collision::{Contact, Face, Rect, paddle_contact};
pub use grid::{Cell2, NeighborIter};
pub use minefield::{
    Board, BoardConfig, BoardPhase, BoardSnapshot, Cell, CellView, MarkOutcome, RevealOutcome,
};
pub use pong::{Ball, Paddle, PaddleMove, Player, PongPhase, PongSnapshot, PongState, PongStep};
pub use snake::{
    COURT_COLS, COURT_ROWS, Direction, SnakeOutcome, SnakePhase, SnakeSnapshot, SnakeState,
    SnakeStep,
};
