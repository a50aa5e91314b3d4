//! Arcade Trio - three small arcade games on one fixed-tick skeleton
//!
//! Core modules:
//! - `sim`: Deterministic game state and simulation steps (board, court, snake)
//! - `game`: Session objects binding input vocabulary, resets and snapshots
//! - `schedule`: Cooperative single-threaded scheduler with generation-tagged continuations
//! - `render`: Renderer seam and a plain-text renderer
//! - `settings`: Difficulty presets and cadence configuration

pub mod error;
pub mod game;
pub mod render;
pub mod schedule;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SettingsError};
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Board clock cadence (one tick per displayed second)
    pub const BOARD_TICK_MS: u64 = 1000;

    /// Pong court dimensions (pixels)
    pub const COURT_WIDTH: f32 = 800.0;
    pub const COURT_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    /// Gap between a paddle's back edge and its side of the court
    pub const PADDLE_INSET: f32 = 10.0;
    /// Distance moved per key repeat
    pub const PADDLE_SPEED: f32 = 10.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_START_SPEED: f32 = 5.0;
    pub const BALL_MAX_SPEED: f32 = 15.0;
    /// Horizontal speed gained per paddle hit (additive)
    pub const BALL_ACCELERATION: f32 = 0.1;
    /// Scales deflection so edge hits never go fully diagonal
    pub const DEFLECTION_DAMPING: f32 = 0.8;
    /// Vertical serve factors (times start speed), kept away from horizontal
    pub const SERVE_VERTICAL_FACTORS: [f32; 2] = [-0.8, 0.8];

    /// First to this many points wins
    pub const WINNING_SCORE: u32 = 5;
    /// Ball game cadence (~60 Hz)
    pub const PONG_TICK_MS: u64 = 16;
    /// Pause after a point before the ball moves again
    pub const SETTLE_DELAY_MS: u64 = 1000;

    /// Snake court dimensions (pixels)
    pub const SNAKE_COURT_WIDTH: i32 = 600;
    pub const SNAKE_COURT_HEIGHT: i32 = 400;
    pub const GRID_SIZE: i32 = 20;
    pub const SNAKE_TICK_MS: u64 = 150;
    pub const FOOD_SCORE: u32 = 10;
    /// Random food draws before falling back to scanning free cells
    pub const FOOD_SAMPLE_ATTEMPTS: u32 = 64;

    /// Maximum ticks run by one scheduler advance
    pub const MAX_CATCHUP_TICKS: u32 = 8;
}
