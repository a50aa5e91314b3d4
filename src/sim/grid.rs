//! Bounds-checked neighbourhood walking for rectangular boards
//!
//! Cells are addressed `(row, col)`. Edges and corners simply have fewer
//! neighbours; nothing wraps.

/// `(row, col)` position on a board.
pub type Cell2 = (usize, usize);

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `cell`, returning a value only when it stays inside `bounds`.
fn apply_delta(cell: Cell2, delta: (isize, isize), bounds: Cell2) -> Option<Cell2> {
    let row = cell.0.checked_add_signed(delta.0)?;
    if row >= bounds.0 {
        return None;
    }
    let col = cell.1.checked_add_signed(delta.1)?;
    if col >= bounds.1 {
        return None;
    }
    Some((row, col))
}

/// Iterator over the up-to-8 in-bounds neighbours of a cell.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Cell2,
    bounds: Cell2,
    index: usize,
}

impl NeighborIter {
    pub fn new(center: Cell2, bounds: Cell2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Cell2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < DISPLACEMENTS.len() {
            let delta = DISPLACEMENTS[self.index];
            self.index += 1;
            if let Some(cell) = apply_delta(self.center, delta, self.bounds) {
                return Some(cell);
            }
        }
        None
    }
}

/// True when `a` lies in the 3x3 block centred on `b`.
#[inline]
pub fn within_one(a: Cell2, b: Cell2) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_has_three_neighbors() {
        let around: Vec<_> = NeighborIter::new((0, 0), (4, 4)).collect();
        assert_eq!(around, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_interior_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((2, 2), (5, 5)).count(), 8);
    }

    #[test]
    fn test_edge_does_not_wrap() {
        let around: Vec<_> = NeighborIter::new((0, 3), (2, 4)).collect();
        assert_eq!(around, vec![(0, 2), (1, 2), (1, 3)]);
    }

    #[test]
    fn test_single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn test_within_one() {
        assert!(within_one((3, 3), (2, 4)));
        assert!(within_one((0, 0), (0, 0)));
        assert!(!within_one((0, 0), (2, 1)));
    }
}
