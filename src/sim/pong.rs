//! Two-paddle ball game state and kinematics
//!
//! Positions are screen pixels with the origin at the court's top-left. The
//! ball moves by its full velocity once per tick; there is no dt scaling.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Face, Rect, paddle_contact};
use crate::consts::*;

/// Paddle owner. Player one defends the left side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    fn face(self) -> Face {
        match self {
            Player::One => Face::Right,
            Player::Two => Face::Left,
        }
    }
}

/// Paddle key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleMove {
    Up,
    Down,
}

impl PaddleMove {
    fn delta(self) -> f32 {
        match self {
            PaddleMove::Up => -PADDLE_SPEED,
            PaddleMove::Down => PADDLE_SPEED,
        }
    }
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PongPhase {
    Playing,
    Paused,
    /// Someone reached the winning score
    Over,
}

/// A paddle, tracked by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
}

impl Paddle {
    fn starting(player: Player) -> Self {
        let x = match player {
            Player::One => PADDLE_INSET,
            Player::Two => COURT_WIDTH - PADDLE_INSET - PADDLE_WIDTH,
        };
        Self {
            pos: Vec2::new(x, (COURT_HEIGHT - PADDLE_HEIGHT) / 2.0),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.pos, Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT))
    }
}

/// The ball, tracked by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.pos, Vec2::splat(BALL_SIZE))
    }
}

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PongStep {
    /// Paused, over, or settling after a point
    Idle,
    Moved,
    /// Point scored; ball re-served and waiting to settle
    Scored(Player),
    /// Point scored and the match is over
    Won(Player),
}

/// Full redraw data for the court
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PongSnapshot {
    pub paddles: [Vec2; 2],
    pub ball: Vec2,
    pub scores: [u32; 2],
    pub phase: PongPhase,
    pub settling: bool,
    pub winner: Option<Player>,
    /// Ticks the ball has moved this match
    pub time_ticks: u64,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct PongState {
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    pub scores: [u32; 2],
    pub phase: PongPhase,
    /// Ball held at centre until the settle continuation fires
    pub settling: bool,
    /// Ticks that moved the ball; paused, settling and finished ticks don't count
    pub time_ticks: u64,
    rng: Pcg32,
}

impl PongState {
    /// Create a match with a freshly served ball
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            paddles: [Paddle::starting(Player::One), Paddle::starting(Player::Two)],
            ball: Ball {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
            },
            scores: [0, 0],
            phase: PongPhase::Playing,
            settling: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.serve();
        state
    }

    /// Centre the ball and pick a random diagonal
    fn serve(&mut self) {
        self.ball.pos = Vec2::new(COURT_WIDTH, COURT_HEIGHT) / 2.0 - Vec2::splat(BALL_SIZE / 2.0);

        let x_sign = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let y_factor =
            SERVE_VERTICAL_FACTORS[self.rng.random_range(0..SERVE_VERTICAL_FACTORS.len())];
        self.ball.vel = Vec2::new(x_sign, y_factor) * BALL_START_SPEED;
    }

    /// Advance the ball by one tick
    pub fn step(&mut self) -> PongStep {
        if self.phase != PongPhase::Playing || self.settling {
            return PongStep::Idle;
        }
        self.time_ticks += 1;

        self.ball.pos += self.ball.vel;

        // Top/bottom walls: always send the ball back into the court
        let rect = self.ball.rect();
        if rect.min.y <= 0.0 {
            self.ball.vel.y = self.ball.vel.y.abs();
        } else if rect.max.y >= COURT_HEIGHT {
            self.ball.vel.y = -self.ball.vel.y.abs();
        }

        for player in Player::BOTH {
            // Only a ball heading toward a paddle can hit it
            let approaching = match player {
                Player::One => self.ball.vel.x < 0.0,
                Player::Two => self.ball.vel.x > 0.0,
            };
            if !approaching {
                continue;
            }

            let face = player.face();
            let paddle = self.paddles[player.index()].rect();
            if let Some(contact) = paddle_contact(&self.ball.rect(), &paddle, face) {
                self.resolve_collision(contact.relative_impact);
                self.ball.pos.x += face.outward() * contact.penetration;
                log::trace!(
                    "Paddle {:?} hit at {:.2}, vel {:?}",
                    player,
                    contact.relative_impact,
                    self.ball.vel
                );
                break;
            }
        }

        let rect = self.ball.rect();
        if rect.min.x <= 0.0 {
            self.award_point(Player::Two)
        } else if rect.max.x >= COURT_WIDTH {
            self.award_point(Player::One)
        } else {
            PongStep::Moved
        }
    }

    /// Bounce off a paddle.
    ///
    /// `relative_impact` is where the ball met the paddle span (0 = top,
    /// 1 = bottom). Horizontal speed gains a fixed increment up to the cap and
    /// the vertical speed follows the impact point.
    pub fn resolve_collision(&mut self, relative_impact: f32) {
        let relative_impact = relative_impact.clamp(0.0, 1.0);
        let speed = (self.ball.vel.x.abs() + BALL_ACCELERATION).min(BALL_MAX_SPEED);
        let direction = if self.ball.vel.x > 0.0 { -1.0 } else { 1.0 };

        self.ball.vel.x = direction * speed;
        self.ball.vel.y = (relative_impact - 0.5) * 2.0 * speed * DEFLECTION_DAMPING;
    }

    fn award_point(&mut self, scorer: Player) -> PongStep {
        let score = &mut self.scores[scorer.index()];
        *score += 1;
        log::debug!("Point to {:?}, score {:?}", scorer, self.scores);

        if self.scores[scorer.index()] >= WINNING_SCORE {
            self.phase = PongPhase::Over;
            log::info!("{:?} wins {:?}", scorer, self.scores);
            return PongStep::Won(scorer);
        }

        self.serve();
        self.settling = true;
        PongStep::Scored(scorer)
    }

    /// Release a ball held after a point. Returns true if it was held.
    pub fn end_settle(&mut self) -> bool {
        std::mem::replace(&mut self.settling, false)
    }

    /// Move a paddle one step, kept fully inside the court
    pub fn move_paddle(&mut self, player: Player, direction: PaddleMove) -> bool {
        if self.phase != PongPhase::Playing {
            return false;
        }
        let paddle = &mut self.paddles[player.index()];
        let before = paddle.pos.y;
        paddle.pos.y = (before + direction.delta()).clamp(0.0, COURT_HEIGHT - PADDLE_HEIGHT);
        paddle.pos.y != before
    }

    /// Toggle between Playing and Paused. Does nothing once the match is over.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            PongPhase::Playing => PongPhase::Paused,
            PongPhase::Paused => PongPhase::Playing,
            PongPhase::Over => return false,
        };
        log::debug!("Pong phase now {:?}", self.phase);
        true
    }

    pub fn winner(&self) -> Option<Player> {
        if self.phase != PongPhase::Over {
            return None;
        }
        Player::BOTH
            .into_iter()
            .find(|p| self.scores[p.index()] >= WINNING_SCORE)
    }

    pub fn snapshot(&self) -> PongSnapshot {
        PongSnapshot {
            paddles: [self.paddles[0].pos, self.paddles[1].pos],
            ball: self.ball.pos,
            scores: self.scores,
            phase: self.phase,
            settling: self.settling,
            winner: self.winner(),
            time_ticks: self.time_ticks,
        }
    }
}
