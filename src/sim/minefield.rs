//! Minesweeper board and reveal engine
//!
//! Mines are laid lazily on the first reveal so the first cell and its
//! neighbours are always safe. All occupancy questions are answered from the
//! `revealed` / `flagged` matrices.

use ndarray::{Array2, Zip};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Cell2, NeighborIter, within_one};
use crate::error::{ConfigError, Result};

/// Content of a board cell, fixed once mines are laid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Mine,
    /// Safe cell with the number of mines among its neighbours
    Empty(u8),
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty(0)
    }
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// Current phase of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoardPhase {
    /// Nothing revealed yet, mines possibly not laid
    #[default]
    Ready,
    InProgress,
    Won,
    Lost,
}

impl BoardPhase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Board dimensions and mine count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoardConfig")]
pub struct BoardConfig {
    rows: usize,
    cols: usize,
    mines: usize,
}

impl BoardConfig {
    /// Validate a configuration for lazily placed mines.
    ///
    /// Rejects any mine count that could not be laid around some first click,
    /// so placement can never run out of candidate cells.
    pub fn new(rows: usize, cols: usize, mines: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        let max = Self::max_mines(rows, cols);
        if mines > max {
            return Err(ConfigError::TooManyMines {
                rows,
                cols,
                mines,
                max,
            });
        }
        Ok(Self { rows, cols, mines })
    }

    /// Largest mine count that fits outside the widest possible safe zone
    pub fn max_mines(rows: usize, cols: usize) -> usize {
        (rows * cols).saturating_sub(rows.min(3) * cols.min(3))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn mines(&self) -> usize {
        self.mines
    }

    pub fn total_cells(&self) -> usize {
        self.rows * self.cols
    }

    pub fn safe_cells(&self) -> usize {
        self.total_cells() - self.mines
    }
}

/// Unchecked wire form; deserializing goes through `BoardConfig::new`
#[derive(Deserialize)]
struct RawBoardConfig {
    rows: usize,
    cols: usize,
    mines: usize,
}

impl TryFrom<RawBoardConfig> for BoardConfig {
    type Error = ConfigError;

    fn try_from(raw: RawBoardConfig) -> Result<Self> {
        Self::new(raw.rows, raw.cols, raw.mines)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// What the renderer sees for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Number(u8),
    Mine,
    /// The mine that ended the game
    Detonated,
}

/// Full redraw data for a board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub phase: BoardPhase,
    pub mines_remaining: i64,
    pub elapsed_secs: u32,
    /// Row-major, `rows * cols` entries
    pub cells: Vec<CellView>,
}

impl BoardSnapshot {
    /// View of one cell; `None` off the board
    pub fn cell(&self, (row, col): Cell2) -> Option<CellView> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }
}

/// Minesweeper board state
#[derive(Debug, Clone)]
pub struct Board {
    size: Cell2,
    mines: usize,
    grid: Array2<Cell>,
    revealed: Array2<bool>,
    flagged: Array2<bool>,
    revealed_count: usize,
    flagged_count: usize,
    phase: BoardPhase,
    mines_laid: bool,
    detonated: Option<Cell2>,
    elapsed_secs: u32,
    rng: Pcg32,
}

impl Board {
    /// Create an empty board; mines are laid by the first reveal
    pub fn new(config: BoardConfig, seed: u64) -> Self {
        let size = (config.rows, config.cols);
        Self {
            size,
            mines: config.mines,
            grid: Array2::default(size),
            revealed: Array2::default(size),
            flagged: Array2::default(size),
            revealed_count: 0,
            flagged_count: 0,
            phase: BoardPhase::Ready,
            mines_laid: false,
            detonated: None,
            elapsed_secs: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Create a board with a fixed mine layout, skipping lazy placement.
    ///
    /// Any density is accepted since no safe zone has to be kept clear.
    pub fn from_layout(rows: usize, cols: usize, mines: &[Cell2]) -> Result<Self> {
        let empty = BoardConfig::new(rows, cols, 0)?;
        let mut board = Self::new(empty, 0);
        board.mines = mines.len();
        for &(row, col) in mines {
            if row >= rows || col >= cols {
                return Err(ConfigError::InvalidCoords { row, col });
            }
            if board.grid[(row, col)].is_mine() {
                return Err(ConfigError::DuplicateMine { row, col });
            }
            board.grid[(row, col)] = Cell::Mine;
        }
        board.count_adjacent_mines();
        board.mines_laid = true;
        Ok(board)
    }

    /// Lay mines around the first reveal at `first`.
    ///
    /// Draws without replacement from the cells outside the 3x3 block around
    /// `first`, so dense boards cost no retries. Only the first call has any effect.
    pub fn place_mines(&mut self, first: Cell2) {
        if self.mines_laid {
            log::warn!("Mines already laid, ignoring placement at {:?}", first);
            return;
        }

        let (rows, cols) = self.size();
        let mut candidates: Vec<Cell2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&cell| !within_one(cell, first))
            .collect();
        // BoardConfig::new guarantees enough candidates for every first cell
        debug_assert!(candidates.len() >= self.mines);
        let (chosen, _) = candidates.partial_shuffle(&mut self.rng, self.mines);
        for &cell in chosen.iter() {
            self.grid[cell] = Cell::Mine;
        }
        log::debug!(
            "Laid {} mines on {}x{} board around {:?}",
            chosen.len(),
            rows,
            cols,
            first
        );

        self.count_adjacent_mines();
        self.mines_laid = true;
    }

    fn count_adjacent_mines(&mut self) {
        let grid = &self.grid;
        let bounds = grid.dim();
        let counted = Array2::from_shape_fn(bounds, |cell| match grid[cell] {
            Cell::Mine => Cell::Mine,
            Cell::Empty(_) => {
                let count = NeighborIter::new(cell, bounds)
                    .filter(|&pos| grid[pos].is_mine())
                    .count();
                Cell::Empty(count as u8)
            }
        });
        self.grid = counted;
    }

    /// Reveal a cell, flood-filling through zero-count cells
    pub fn reveal(&mut self, cell: Cell2) -> RevealOutcome {
        if !self.contains(cell) {
            log::debug!("Ignoring reveal outside board at {:?}", cell);
            return RevealOutcome::NoChange;
        }
        if self.phase.is_finished() || self.flagged[cell] || self.revealed[cell] {
            return RevealOutcome::NoChange;
        }

        if !self.mines_laid {
            self.place_mines(cell);
        }
        if self.phase == BoardPhase::Ready {
            self.phase = BoardPhase::InProgress;
            log::info!("Board started at {:?}", cell);
        }

        if self.grid[cell].is_mine() {
            self.detonate(cell);
            return RevealOutcome::HitMine;
        }

        self.flood_reveal(cell);

        if self.revealed_count == self.safe_cells() {
            self.win();
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Work-list flood fill. Flagged cells stop the fill and stay hidden.
    fn flood_reveal(&mut self, start: Cell2) {
        let bounds = self.size();
        let mut work = vec![start];

        while let Some(cell) = work.pop() {
            if self.revealed[cell] || self.flagged[cell] {
                continue;
            }
            // Only neighbours of zero cells are queued, so no mine gets here
            self.revealed[cell] = true;
            self.revealed_count += 1;

            if self.grid[cell] == Cell::Empty(0) {
                work.extend(
                    NeighborIter::new(cell, bounds)
                        .filter(|&pos| !self.revealed[pos] && !self.flagged[pos]),
                );
            }
        }
    }

    fn detonate(&mut self, cell: Cell2) {
        self.phase = BoardPhase::Lost;
        self.detonated = Some(cell);

        let mut exposed = 0;
        Zip::from(&mut self.revealed)
            .and(&self.grid)
            .for_each(|revealed, content| {
                if content.is_mine() && !*revealed {
                    *revealed = true;
                    exposed += 1;
                }
            });
        self.revealed_count += exposed;

        log::info!("Mine hit at {:?}, game lost", cell);
    }

    fn win(&mut self) {
        self.phase = BoardPhase::Won;
        Zip::from(&mut self.flagged)
            .and(&self.grid)
            .for_each(|flagged, content| {
                if content.is_mine() {
                    *flagged = true;
                }
            });
        self.flagged_count = self.flagged.iter().filter(|&&flag| flag).count();

        log::info!("Board cleared, game won");
    }

    /// Flip the flag on a hidden cell while the game is not over
    pub fn toggle_flag(&mut self, cell: Cell2) -> MarkOutcome {
        if !self.contains(cell) || self.phase.is_finished() || self.revealed[cell] {
            return MarkOutcome::NoChange;
        }

        let flag = &mut self.flagged[cell];
        *flag = !*flag;
        if *flag {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        MarkOutcome::Changed
    }

    /// Advance the board clock by one second. Returns true if it moved.
    pub fn tick_clock(&mut self) -> bool {
        if self.phase == BoardPhase::InProgress {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, (row, col): Cell2) -> bool {
        row < self.size.0 && col < self.size.1
    }

    pub fn size(&self) -> Cell2 {
        self.size
    }

    pub fn mine_count(&self) -> usize {
        self.mines
    }

    fn safe_cells(&self) -> usize {
        self.size.0 * self.size.1 - self.mines
    }

    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    pub fn mines_laid(&self) -> bool {
        self.mines_laid
    }

    /// Content of a cell; `None` off the board
    pub fn cell_at(&self, cell: Cell2) -> Option<Cell> {
        self.grid.get(cell).copied()
    }

    /// False off the board
    pub fn is_revealed(&self, cell: Cell2) -> bool {
        self.revealed.get(cell).copied().unwrap_or(false)
    }

    /// False off the board
    pub fn is_flagged(&self, cell: Cell2) -> bool {
        self.flagged.get(cell).copied().unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged_count
    }

    /// Mines minus flags; negative when over-flagged
    pub fn mines_remaining(&self) -> i64 {
        self.mines as i64 - self.flagged_count as i64
    }

    pub fn detonated(&self) -> Option<Cell2> {
        self.detonated
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let cells = Zip::indexed(&self.grid)
            .and(&self.revealed)
            .and(&self.flagged)
            .map_collect(|cell, &content, &revealed, &flagged| {
                match (revealed, flagged, content) {
                    (true, _, Cell::Mine) if self.detonated == Some(cell) => CellView::Detonated,
                    (true, _, Cell::Mine) => CellView::Mine,
                    (true, _, Cell::Empty(count)) => CellView::Number(count),
                    (false, true, _) => CellView::Flagged,
                    (false, false, _) => CellView::Hidden,
                }
            })
            .iter()
            .copied()
            .collect();

        BoardSnapshot {
            rows: self.size.0,
            cols: self.size.1,
            phase: self.phase,
            mines_remaining: self.mines_remaining(),
            elapsed_secs: self.elapsed_secs,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mine_cells(board: &Board) -> Vec<Cell2> {
        let (rows, cols) = board.size();
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&cell| board.cell_at(cell).unwrap().is_mine())
            .collect()
    }

    fn live_count(board: &Board, cell: Cell2) -> u8 {
        NeighborIter::new(cell, board.size())
            .filter(|&pos| board.cell_at(pos).unwrap().is_mine())
            .count() as u8
    }

    #[test]
    fn test_config_rejects_unplaceable_mine_counts() {
        assert_eq!(BoardConfig::max_mines(10, 10), 91);
        assert!(BoardConfig::new(10, 10, 91).is_ok());
        assert_eq!(
            BoardConfig::new(10, 10, 92),
            Err(ConfigError::TooManyMines {
                rows: 10,
                cols: 10,
                mines: 92,
                max: 91
            })
        );
        assert_eq!(BoardConfig::new(0, 5, 0), Err(ConfigError::EmptyBoard));
        // 2x2 is swallowed whole by the safe zone
        assert_eq!(BoardConfig::max_mines(2, 2), 0);
    }

    #[test]
    fn test_config_deserialize_is_checked() {
        let config: BoardConfig = serde_json::from_str(r#"{"rows":9,"cols":9,"mines":10}"#).unwrap();
        assert_eq!((config.rows(), config.cols(), config.mines()), (9, 9, 10));

        assert!(serde_json::from_str::<BoardConfig>(r#"{"rows":3,"cols":3,"mines":1}"#).is_err());
        assert!(serde_json::from_str::<BoardConfig>(r#"{"rows":0,"cols":4,"mines":0}"#).is_err());
    }

    #[test]
    fn test_first_reveal_lays_mines_outside_safe_zone() {
        let config = BoardConfig::new(10, 10, 15).unwrap();
        let mut board = Board::new(config, 12345);
        assert!(!board.mines_laid());
        assert_eq!(board.phase(), BoardPhase::Ready);

        let outcome = board.reveal((5, 5));

        assert!(outcome.has_update());
        assert!(board.mines_laid());
        let mines = mine_cells(&board);
        assert_eq!(mines.len(), 15);
        assert!(mines.iter().all(|&mine| !within_one(mine, (5, 5))));
        assert_eq!(board.cell_at((5, 5)).unwrap(), Cell::Empty(0));
    }

    #[test]
    fn test_dense_board_fills_every_candidate() {
        let config = BoardConfig::new(4, 4, 7).unwrap();
        let mut board = Board::new(config, 7);

        assert_eq!(board.reveal((1, 1)), RevealOutcome::Won);
        let mines = mine_cells(&board);
        assert_eq!(mines.len(), 7);
        for row in 0..4 {
            for col in 0..4 {
                let mine = board.cell_at((row, col)).unwrap().is_mine();
                assert_eq!(mine, !within_one((row, col), (1, 1)));
            }
        }
    }

    #[test]
    fn test_three_by_three_single_mine_win() {
        let mut board = Board::from_layout(3, 3, &[(0, 0)]).unwrap();
        let others = [(0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

        for &cell in &others {
            board.reveal(cell);
            assert_ne!(board.phase(), BoardPhase::Lost);
        }
        assert_eq!(board.phase(), BoardPhase::Won);
        assert_eq!(board.revealed_count(), 8);
        assert!(!board.is_revealed((0, 0)));
        // Mines are flagged on a win
        assert!(board.is_flagged((0, 0)));
        assert_eq!(board.mines_remaining(), 0);
    }

    #[test]
    fn test_win_only_on_last_safe_cell() {
        let mut board = Board::from_layout(3, 3, &[(0, 0)]).unwrap();

        // The numbered ring around the mine opens one cell at a time
        for cell in [(0, 1), (1, 0), (1, 1)] {
            assert_eq!(board.reveal(cell), RevealOutcome::Revealed);
            assert_eq!(board.phase(), BoardPhase::InProgress);
        }
        assert_eq!(board.revealed_count(), 3);

        assert_eq!(board.reveal((2, 2)), RevealOutcome::Won);
        assert_eq!(board.revealed_count(), 8);
        assert_eq!(board.reveal((0, 0)), RevealOutcome::NoChange);
    }

    #[test]
    fn test_flood_fill_opens_zero_region() {
        let mut board = Board::from_layout(3, 3, &[(0, 0)]).unwrap();

        assert_eq!(board.reveal((2, 2)), RevealOutcome::Won);
        assert_eq!(board.cell_at((2, 2)).unwrap(), Cell::Empty(0));
        assert_eq!(board.cell_at((1, 1)).unwrap(), Cell::Empty(1));
        assert!(!board.is_revealed((0, 0)));
    }

    #[test]
    fn test_flood_fill_stops_at_numbers() {
        // Mine column splits the board; the fill must not cross it
        let mut board = Board::from_layout(3, 5, &[(0, 2), (1, 2), (2, 2)]).unwrap();

        assert_eq!(board.reveal((1, 0)), RevealOutcome::Revealed);
        for row in 0..3 {
            assert!(board.is_revealed((row, 0)));
            assert!(board.is_revealed((row, 1)));
            assert!(!board.is_revealed((row, 3)));
            assert!(!board.is_revealed((row, 4)));
        }
        assert_eq!(board.revealed_count(), 6);
    }

    #[test]
    fn test_flood_fill_leaves_flagged_cells_hidden() {
        let mut board = Board::from_layout(4, 4, &[(3, 3)]).unwrap();
        assert_eq!(board.toggle_flag((0, 3)), MarkOutcome::Changed);

        assert_eq!(board.reveal((0, 0)), RevealOutcome::Revealed);
        assert!(!board.is_revealed((0, 3)));
        assert!(board.is_flagged((0, 3)));
        assert_eq!(board.revealed_count(), 14);

        // Clearing the flag and revealing finishes the board
        board.toggle_flag((0, 3));
        assert_eq!(board.reveal((0, 3)), RevealOutcome::Won);
    }

    #[test]
    fn test_reveal_on_flagged_cell_is_noop() {
        let mut board = Board::from_layout(2, 2, &[(0, 0)]).unwrap();
        board.toggle_flag((1, 1));

        assert_eq!(board.reveal((1, 1)), RevealOutcome::NoChange);
        assert!(!board.is_revealed((1, 1)));
        assert_eq!(board.phase(), BoardPhase::Ready);
    }

    #[test]
    fn test_hitting_mine_loses_and_exposes_all_mines() {
        let mut board = Board::from_layout(3, 3, &[(0, 0), (2, 2)]).unwrap();
        board.toggle_flag((1, 1));

        assert_eq!(board.reveal((0, 0)), RevealOutcome::HitMine);
        assert_eq!(board.phase(), BoardPhase::Lost);
        assert_eq!(board.detonated(), Some((0, 0)));
        assert!(board.is_revealed((2, 2)));
        assert_eq!(board.revealed_count(), 2);

        let snapshot = board.snapshot();
        assert_eq!(snapshot.cell((0, 0)).unwrap(), CellView::Detonated);
        assert_eq!(snapshot.cell((2, 2)).unwrap(), CellView::Mine);
        assert_eq!(snapshot.cell((1, 1)).unwrap(), CellView::Flagged);
        assert_eq!(snapshot.cell((0, 1)).unwrap(), CellView::Hidden);

        // Finished boards accept nothing
        assert_eq!(board.reveal((0, 2)), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((0, 2)), MarkOutcome::NoChange);
        assert_eq!(board.toggle_flag((1, 1)), MarkOutcome::NoChange);
    }

    #[test]
    fn test_flag_counter_goes_negative() {
        let mut board = Board::from_layout(3, 3, &[(0, 0)]).unwrap();
        board.toggle_flag((0, 1));
        board.toggle_flag((0, 2));
        board.toggle_flag((1, 2));

        assert_eq!(board.flagged_count(), 3);
        assert_eq!(board.mines_remaining(), -2);

        board.toggle_flag((0, 2));
        assert_eq!(board.mines_remaining(), -1);
    }

    #[test]
    fn test_flag_on_revealed_cell_is_noop() {
        let mut board = Board::from_layout(3, 3, &[(0, 0)]).unwrap();
        board.reveal((0, 1));

        assert_eq!(board.toggle_flag((0, 1)), MarkOutcome::NoChange);
        assert!(!board.is_flagged((0, 1)));
    }

    #[test]
    fn test_out_of_range_actions_are_ignored() {
        let mut board = Board::from_layout(3, 3, &[(0, 0)]).unwrap();

        assert_eq!(board.reveal((3, 0)), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((0, 9)), MarkOutcome::NoChange);
        assert_eq!(board.phase(), BoardPhase::Ready);

        assert_eq!(board.cell_at((9, 9)), None);
        assert!(!board.is_revealed((3, 0)));
        assert!(!board.is_flagged((0, 3)));
        let snapshot = board.snapshot();
        assert_eq!(snapshot.cell((5, 0)), None);
        assert_eq!(snapshot.cell((0, 3)), None);
        assert_eq!(snapshot.cell((2, 2)), Some(CellView::Hidden));
    }

    #[test]
    fn test_layout_rejects_bad_mines() {
        assert_eq!(
            Board::from_layout(2, 2, &[(2, 0)]).unwrap_err(),
            ConfigError::InvalidCoords { row: 2, col: 0 }
        );
        assert_eq!(
            Board::from_layout(2, 2, &[(1, 1), (1, 1)]).unwrap_err(),
            ConfigError::DuplicateMine { row: 1, col: 1 }
        );

        // Fixed layouts skip the first-reveal safe zone, so any density goes
        let full = Board::from_layout(2, 2, &[(0, 0), (0, 1), (1, 0), (1, 1)]).unwrap();
        assert_eq!(full.mine_count(), 4);
        assert_eq!(full.mines_remaining(), 4);
    }

    #[test]
    fn test_clock_runs_only_in_progress() {
        let mut board = Board::from_layout(3, 3, &[(0, 0)]).unwrap();
        assert!(!board.tick_clock());

        board.reveal((0, 1));
        assert!(board.tick_clock());
        assert!(board.tick_clock());
        assert_eq!(board.elapsed_secs(), 2);

        board.reveal((0, 0));
        assert!(!board.tick_clock());
        assert_eq!(board.snapshot().elapsed_secs, 2);
    }

    proptest! {
        #[test]
        fn prop_placement_spares_first_click_and_counts_match(
            rows in 1usize..14,
            cols in 1usize..14,
            density in 0.0f64..=1.0,
            first in (0usize..14, 0usize..14),
            seed in any::<u64>(),
        ) {
            let first = (first.0 % rows, first.1 % cols);
            let mines = (BoardConfig::max_mines(rows, cols) as f64 * density) as usize;
            let config = BoardConfig::new(rows, cols, mines).unwrap();
            let mut board = Board::new(config, seed);
            board.place_mines(first);

            let placed = mine_cells(&board);
            prop_assert_eq!(placed.len(), mines);
            prop_assert!(placed.iter().all(|&mine| !within_one(mine, first)));

            let mut count_sum = 0usize;
            let mut adjacency_pairs = 0usize;
            for row in 0..rows {
                for col in 0..cols {
                    match board.cell_at((row, col)).unwrap() {
                        Cell::Mine => {
                            adjacency_pairs += NeighborIter::new((row, col), board.size())
                                .filter(|&pos| !board.cell_at(pos).unwrap().is_mine())
                                .count();
                        }
                        Cell::Empty(count) => {
                            prop_assert_eq!(count, live_count(&board, (row, col)));
                            count_sum += count as usize;
                        }
                    }
                }
            }
            prop_assert_eq!(count_sum, adjacency_pairs);
        }

        #[test]
        fn prop_flood_fill_closes_zero_region(
            rows in 1usize..16,
            cols in 1usize..16,
            density in 0.0f64..0.4,
            first in (0usize..16, 0usize..16),
            seed in any::<u64>(),
        ) {
            let first = (first.0 % rows, first.1 % cols);
            let mines = (BoardConfig::max_mines(rows, cols) as f64 * density) as usize;
            let config = BoardConfig::new(rows, cols, mines).unwrap();
            let mut board = Board::new(config, seed);

            let outcome = board.reveal(first);
            prop_assert!(matches!(outcome, RevealOutcome::Revealed | RevealOutcome::Won));

            let mut revealed = 0;
            for row in 0..rows {
                for col in 0..cols {
                    let cell = (row, col);
                    if !board.is_revealed(cell) {
                        continue;
                    }
                    revealed += 1;
                    prop_assert!(!board.cell_at(cell).unwrap().is_mine());
                    if board.cell_at(cell).unwrap() == Cell::Empty(0) {
                        for pos in NeighborIter::new(cell, board.size()) {
                            prop_assert!(board.is_revealed(pos));
                        }
                    }
                }
            }
            prop_assert_eq!(revealed, board.revealed_count());
            prop_assert_eq!(
                board.phase() == BoardPhase::Won,
                board.revealed_count() == rows * cols - mines
            );
        }
    }
}
