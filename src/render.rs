//! Renderers for game snapshots
//!
//! Every redraw receives a full snapshot. `TextRenderer` draws ASCII frames for
//! the headless binary; `FrameLog` records snapshots for inspection.

use std::fmt::Write as _;

use crate::consts::*;
use crate::schedule::Renderer;
use crate::sim::{
    BoardPhase, BoardSnapshot, CellView, COURT_COLS, COURT_ROWS, PongPhase, PongSnapshot,
    SnakePhase, SnakeSnapshot,
};

/// Discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl<S> Renderer<S> for NullRenderer {
    fn draw(&mut self, _snapshot: &S) {}
}

/// Keeps every snapshot it is asked to draw
#[derive(Debug, Clone)]
pub struct FrameLog<S> {
    pub frames: Vec<S>,
}

impl<S> Default for FrameLog<S> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<S> FrameLog<S> {
    pub fn last(&self) -> Option<&S> {
        self.frames.last()
    }
}

impl<S: Clone> Renderer<S> for FrameLog<S> {
    fn draw(&mut self, snapshot: &S) {
        self.frames.push(snapshot.clone());
    }
}

/// Snapshot that can be drawn as text
pub trait TextFrame {
    fn to_text(&self) -> String;
}

/// Character cells used for the pong court
const PONG_TEXT_COLS: usize = 80;
const PONG_TEXT_ROWS: usize = 25;

impl TextFrame for BoardSnapshot {
    fn to_text(&self) -> String {
        let status = match self.phase {
            BoardPhase::Ready => "ready",
            BoardPhase::InProgress => "playing",
            BoardPhase::Won => "won",
            BoardPhase::Lost => "lost",
        };
        let mut out = format!(
            "{}  mines {}  time {}s\n",
            status, self.mines_remaining, self.elapsed_secs
        );
        for row in 0..self.rows {
            for col in 0..self.cols {
                let glyph = match self.cell((row, col)).unwrap_or(CellView::Hidden) {
                    CellView::Hidden => '#',
                    CellView::Flagged => 'F',
                    CellView::Number(0) => '.',
                    CellView::Number(n) => char::from(b'0' + n),
                    CellView::Mine => '*',
                    CellView::Detonated => 'X',
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

impl TextFrame for PongSnapshot {
    fn to_text(&self) -> String {
        let to_col = |x: f32| {
            ((x / COURT_WIDTH * PONG_TEXT_COLS as f32) as usize).min(PONG_TEXT_COLS - 1)
        };
        let to_row = |y: f32| {
            ((y / COURT_HEIGHT * PONG_TEXT_ROWS as f32) as usize).min(PONG_TEXT_ROWS - 1)
        };

        let mut grid = vec![[' '; PONG_TEXT_COLS]; PONG_TEXT_ROWS];
        for paddle in &self.paddles {
            let col = to_col(paddle.x + PADDLE_WIDTH / 2.0);
            for row in to_row(paddle.y)..=to_row(paddle.y + PADDLE_HEIGHT - 1.0) {
                grid[row][col] = '|';
            }
        }
        let ball = self.ball + glam::Vec2::splat(BALL_SIZE / 2.0);
        grid[to_row(ball.y)][to_col(ball.x)] = 'o';

        let mut out = format!("P1 {}  P2 {}", self.scores[0], self.scores[1]);
        match (self.phase, self.winner) {
            (PongPhase::Over, Some(winner)) => {
                let _ = write!(out, "  {:?} wins", winner);
            }
            (PongPhase::Paused, _) => out.push_str("  paused"),
            _ if self.settling => out.push_str("  serve"),
            _ => {}
        }
        out.push('\n');
        push_framed(&mut out, &grid);
        out
    }
}

impl TextFrame for SnakeSnapshot {
    fn to_text(&self) -> String {
        let cols = COURT_COLS as usize;
        let rows = COURT_ROWS as usize;
        let mut grid = vec![vec!['.'; cols]; rows];
        let mut put = |cell: glam::IVec2, glyph: char| {
            let (col, row) = (cell.x / GRID_SIZE, cell.y / GRID_SIZE);
            if (0..COURT_COLS).contains(&col) && (0..COURT_ROWS).contains(&row) {
                grid[row as usize][col as usize] = glyph;
            }
        };

        if let Some(food) = self.food {
            put(food, '*');
        }
        for (i, &segment) in self.segments.iter().enumerate() {
            put(segment, if i == 0 { '@' } else { 'o' });
        }

        let mut out = format!("score {}", self.score);
        if self.phase == SnakePhase::Over {
            let _ = write!(out, "  game over");
            if let Some(outcome) = self.outcome {
                let _ = write!(out, " ({:?})", outcome);
            }
        }
        out.push('\n');
        push_framed(&mut out, &grid);
        out
    }
}

fn push_framed<R: AsRef<[char]>>(out: &mut String, grid: &[R]) {
    let width = grid.first().map_or(0, |row| row.as_ref().len());
    let border: String = std::iter::once('+')
        .chain(std::iter::repeat_n('-', width))
        .chain(std::iter::once('+'))
        .collect();
    out.push_str(&border);
    out.push('\n');
    for row in grid {
        out.push('|');
        out.extend(row.as_ref().iter());
        out.push_str("|\n");
    }
    out.push_str(&border);
    out.push('\n');
}

/// Draws frames as ASCII text
#[derive(Debug, Default)]
pub struct TextRenderer {
    last: String,
    drawn: u64,
    echo: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print every frame to stdout as it is drawn
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn last_frame(&self) -> &str {
        &self.last
    }

    pub fn frames_drawn(&self) -> u64 {
        self.drawn
    }
}

impl<S: TextFrame> Renderer<S> for TextRenderer {
    fn draw(&mut self, snapshot: &S) {
        self.last = snapshot.to_text();
        self.drawn += 1;
        if self.echo {
            println!("{}", self.last);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Board, PongState, SnakeState};

    #[test]
    fn test_board_text() {
        let mut board = Board::from_layout(2, 3, &[(0, 0)]).unwrap();
        board.toggle_flag((0, 0));
        board.reveal((1, 2));

        let text = board.snapshot().to_text();
        assert_eq!(text, "playing  mines 0  time 0s\nF1.\n#1.\n");
    }

    #[test]
    fn test_lost_board_shows_detonation() {
        let mut board = Board::from_layout(1, 3, &[(0, 0), (0, 2)]).unwrap();
        board.reveal((0, 2));
        let text = board.snapshot().to_text();
        assert!(text.starts_with("lost"));
        assert!(text.ends_with("*#X\n"));
    }

    #[test]
    fn test_pong_text_has_paddles_and_ball() {
        let text = PongState::new(3).snapshot().to_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "P1 0  P2 0");
        // Header, two borders and the court rows
        assert_eq!(lines.len(), 1 + 2 + PONG_TEXT_ROWS);
        assert_eq!(text.matches('o').count(), 1);
        assert!(lines.iter().all(|l| l.chars().count() <= PONG_TEXT_COLS + 2));
        assert!(text.matches('|').count() > 2 * (PONG_TEXT_ROWS + 2));
    }

    #[test]
    fn test_snake_text_marks_head() {
        let text = SnakeState::new(1).snapshot().to_text();
        let rows: Vec<&str> = text.lines().skip(2).take(COURT_ROWS as usize).collect();

        // Head at (100, 100) is column 5, row 5
        assert_eq!(rows[5].chars().nth(1 + 5), Some('@'));
        assert_eq!(rows[5].chars().nth(1 + 4), Some('o'));
        assert_eq!(rows[5].chars().nth(1 + 3), Some('o'));
        assert_eq!(text.matches('*').count(), 1);
    }

    #[test]
    fn test_text_renderer_keeps_last_frame() {
        let mut renderer = TextRenderer::new();
        let board = Board::from_layout(1, 2, &[]).unwrap();
        renderer.draw(&board.snapshot());
        assert_eq!(renderer.frames_drawn(), 1);
        assert_eq!(renderer.last_frame(), "ready  mines 0  time 0s\n##\n");
    }
}
