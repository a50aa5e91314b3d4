//! Game settings and preferences
//!
//! Loaded from an optional JSON file. Any field left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SettingsError};
use crate::sim::BoardConfig;

/// Board size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
    Custom {
        rows: usize,
        cols: usize,
        mines: usize,
    },
}

impl Difficulty {
    pub const PRESETS: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Expert => "Expert",
            Difficulty::Custom { .. } => "Custom",
        }
    }

    /// Parse a preset name or a `ROWSxCOLS:MINES` custom size
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beginner" | "easy" => Some(Difficulty::Beginner),
            "intermediate" | "medium" => Some(Difficulty::Intermediate),
            "expert" | "hard" => Some(Difficulty::Expert),
            custom => {
                let (size, mines) = custom.split_once(':')?;
                let (rows, cols) = size.split_once('x')?;
                Some(Difficulty::Custom {
                    rows: rows.trim().parse().ok()?,
                    cols: cols.trim().parse().ok()?,
                    mines: mines.trim().parse().ok()?,
                })
            }
        }
    }

    /// (rows, cols, mines)
    pub fn dimensions(&self) -> (usize, usize, usize) {
        match *self {
            Difficulty::Beginner => (10, 10, 15),
            Difficulty::Intermediate => (16, 16, 40),
            Difficulty::Expert => (16, 30, 99),
            Difficulty::Custom { rows, cols, mines } => (rows, cols, mines),
        }
    }

    /// Validated board configuration for this difficulty
    pub fn board_config(&self) -> Result<BoardConfig> {
        let (rows, cols, mines) = self.dimensions();
        BoardConfig::new(rows, cols, mines)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting board size
    pub difficulty: Difficulty,
    /// Fixed session seed; fresh entropy when absent
    pub seed: Option<u64>,

    // === Cadence ===
    pub board_tick_ms: u64,
    pub pong_tick_ms: u64,
    pub snake_tick_ms: u64,
    /// Ball hold after a point before play resumes
    pub settle_delay_ms: u64,
    /// Most ticks one scheduler advance may run before dropping backlog
    pub max_catchup_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            seed: None,

            board_tick_ms: BOARD_TICK_MS,
            pong_tick_ms: PONG_TICK_MS,
            snake_tick_ms: SNAKE_TICK_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            max_catchup_ticks: MAX_CATCHUP_TICKS,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load(path: &Path) -> core::result::Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> core::result::Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Session seed, drawing one from entropy if none is configured
    pub fn session_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Zero cadences would stall the scheduler
    fn sanitize(&mut self) {
        for (name, value) in [
            ("board_tick_ms", &mut self.board_tick_ms),
            ("pong_tick_ms", &mut self.pong_tick_ms),
            ("snake_tick_ms", &mut self.snake_tick_ms),
        ] {
            if *value == 0 {
                log::warn!("{} must be positive, using 1", name);
                *value = 1;
            }
        }
        if self.max_catchup_ticks == 0 {
            log::warn!("max_catchup_ticks must be positive, using 1");
            self.max_catchup_ticks = 1;
        }
    }
}
