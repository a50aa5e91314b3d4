//! Snake movement engine
//!
//! Coordinates are pixel positions snapped to the grid (multiples of
//! `GRID_SIZE`), head first. Direction changes are buffered and only commit on
//! the next step.

use std::collections::VecDeque;

use glam::IVec2;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};

/// Court size in grid cells
pub const COURT_COLS: i32 = SNAKE_COURT_WIDTH / GRID_SIZE;
pub const COURT_ROWS: i32 = SNAKE_COURT_HEIGHT / GRID_SIZE;

/// Heading on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// One grid cell in this direction (screen y grows downward)
    pub fn offset(self) -> IVec2 {
        let unit = match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        };
        unit * GRID_SIZE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakePhase {
    Playing,
    Over,
}

/// Why a snake game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeOutcome {
    HitWall,
    HitSelf,
    /// Every cell is snake; no room left for food
    CourtFilled,
}

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeStep {
    Idle,
    Moved,
    Ate,
    Over(SnakeOutcome),
}

/// Full redraw data for the snake court
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnakeSnapshot {
    /// Head first
    pub segments: Vec<IVec2>,
    pub food: Option<IVec2>,
    pub score: u32,
    pub phase: SnakePhase,
    pub direction: Direction,
    pub outcome: Option<SnakeOutcome>,
    /// Moves made this game
    pub time_ticks: u64,
}

#[inline]
fn in_court(cell: IVec2) -> bool {
    cell.x >= 0 && cell.x < SNAKE_COURT_WIDTH && cell.y >= 0 && cell.y < SNAKE_COURT_HEIGHT
}

#[inline]
fn on_grid(cell: IVec2) -> bool {
    cell.x % GRID_SIZE == 0 && cell.y % GRID_SIZE == 0
}

/// Complete snake game state
#[derive(Debug, Clone)]
pub struct SnakeState {
    /// Segments, head first
    pub body: VecDeque<IVec2>,
    /// `None` only once the snake fills the court
    pub food: Option<IVec2>,
    pub direction: Direction,
    pub pending_direction: Direction,
    pub score: u32,
    pub phase: SnakePhase,
    pub outcome: Option<SnakeOutcome>,
    /// Steps taken while playing, including the one that ended the game
    pub time_ticks: u64,
    rng: Pcg32,
}

impl SnakeState {
    /// Three segments heading right from (100, 100), food somewhere free
    pub fn new(seed: u64) -> Self {
        let body = [IVec2::new(100, 100), IVec2::new(80, 100), IVec2::new(60, 100)];
        let mut state = Self {
            body: body.into_iter().collect(),
            food: None,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            score: 0,
            phase: SnakePhase::Playing,
            outcome: None,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.food = state.random_free_cell();
        state
    }

    /// Build a state from an explicit layout, validating every invariant
    pub fn from_parts(
        body: Vec<IVec2>,
        direction: Direction,
        food: IVec2,
        seed: u64,
    ) -> Result<Self> {
        if body.is_empty() {
            return Err(ConfigError::InvalidSnake("body is empty"));
        }
        if body.iter().chain([&food]).any(|&cell| !on_grid(cell) || !in_court(cell)) {
            return Err(ConfigError::InvalidSnake("cell off the court grid"));
        }
        if body
            .windows(2)
            .any(|pair| (pair[0] - pair[1]).abs().element_sum() != GRID_SIZE)
        {
            return Err(ConfigError::InvalidSnake("segments are not contiguous"));
        }
        for (i, cell) in body.iter().enumerate() {
            if body[i + 1..].contains(cell) {
                return Err(ConfigError::InvalidSnake("segments overlap"));
            }
        }
        if body.contains(&food) {
            return Err(ConfigError::InvalidSnake("food is on the snake"));
        }

        Ok(Self {
            body: body.into(),
            food: Some(food),
            direction,
            pending_direction: direction,
            score: 0,
            phase: SnakePhase::Playing,
            outcome: None,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Buffer a heading for the next step. Reversals are refused.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if self.phase == SnakePhase::Over || direction == self.direction.opposite() {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Move one cell in the committed direction
    pub fn step(&mut self) -> SnakeStep {
        if self.phase == SnakePhase::Over {
            return SnakeStep::Idle;
        }
        let Some(&head) = self.body.front() else {
            return SnakeStep::Idle;
        };
        self.time_ticks += 1;

        self.direction = self.pending_direction;
        let next = head + self.direction.offset();
        let growing = self.food == Some(next);

        if !in_court(next) {
            return self.finish(SnakeOutcome::HitWall);
        }
        // The tail vacates this tick unless the snake grows
        let occupied = if growing {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        if self.body.iter().take(occupied).any(|&segment| segment == next) {
            return self.finish(SnakeOutcome::HitSelf);
        }

        self.body.push_front(next);
        if !growing {
            self.body.pop_back();
            return SnakeStep::Moved;
        }

        self.score += FOOD_SCORE;
        self.food = self.random_free_cell();
        log::debug!("Food eaten, score {}, next food {:?}", self.score, self.food);
        if self.food.is_none() {
            return self.finish(SnakeOutcome::CourtFilled);
        }
        SnakeStep::Ate
    }

    fn finish(&mut self, outcome: SnakeOutcome) -> SnakeStep {
        self.phase = SnakePhase::Over;
        self.outcome = Some(outcome);
        log::info!("Snake game over ({:?}), score {}", outcome, self.score);
        SnakeStep::Over(outcome)
    }

    /// Uniform random grid cell not covered by the snake.
    ///
    /// Resamples a bounded number of times, then picks from the explicit list of
    /// free cells. `None` when the snake covers the whole court.
    fn random_free_cell(&mut self) -> Option<IVec2> {
        if self.body.len() >= (COURT_COLS * COURT_ROWS) as usize {
            return None;
        }

        for _ in 0..FOOD_SAMPLE_ATTEMPTS {
            let cell = IVec2::new(
                self.rng.random_range(0..COURT_COLS),
                self.rng.random_range(0..COURT_ROWS),
            ) * GRID_SIZE;
            if !self.body.contains(&cell) {
                return Some(cell);
            }
        }

        let free: Vec<IVec2> = (0..COURT_ROWS)
            .flat_map(|row| (0..COURT_COLS).map(move |col| IVec2::new(col, row) * GRID_SIZE))
            .filter(|cell| !self.body.contains(cell))
            .collect();
        free.choose(&mut self.rng).copied()
    }

    pub fn head(&self) -> Option<IVec2> {
        self.body.front().copied()
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            segments: self.body.iter().copied().collect(),
            food: self.food,
            score: self.score,
            phase: self.phase,
            direction: self.direction,
            outcome: self.outcome,
            time_ticks: self.time_ticks,
        }
    }
}
