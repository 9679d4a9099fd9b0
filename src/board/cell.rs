use itertools::Itertools;

/// Cell coordinates, `x` first.
///
/// Coordinates are signed so that neighbors of edge cells can be expressed
/// and then rejected by bounds checks.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos(pub i32, pub i32);
impl CellPos {
    /// Returns the X coordinate.
    pub fn x(self) -> i32 {
        self.0
    }
    /// Returns the Y coordinate.
    pub fn y(self) -> i32 {
        self.1
    }

    /// Returns an iterator over the 8 surrounding positions, not including
    /// `self`. Positions may be outside the board.
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        (-1..=1)
            .cartesian_product(-1..=1)
            .filter(|&(dx, dy)| (dx, dy) != (0, 0))
            .map(move |(dx, dy)| CellPos(self.0 + dx, self.1 + dy))
    }
}

/// Visibility state of a cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Covered and unmarked.
    Hidden,
    /// Uncovered by the player or by a cascade.
    Revealed,
    /// Covered and marked with a flag.
    Flagged,
}
impl Default for CellState {
    fn default() -> Self {
        CellState::Hidden
    }
}

/// Everything a renderer needs to know to draw one cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CellView {
    /// Covered cell.
    Hidden,
    /// Covered cell with a flag.
    Flagged,
    /// Revealed safe cell with its adjacent mine count.
    Revealed(u8),
    /// Revealed mine that ended the game.
    Exploded,
}

/// Result of [`super::Board::reveal()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Nothing happened: out of bounds, not hidden, or the game is over.
    NoChange,
    /// Some number of safe cells were revealed (at least one).
    Revealed(usize),
    /// A mine was revealed and the game is over.
    Exploded,
}

/// Result of [`super::Board::toggle_flag()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FlagOutcome {
    /// Nothing happened: out of bounds, revealed, or the game is over.
    NoChange,
    /// A flag was placed on a hidden cell.
    Placed,
    /// A flag was removed.
    Removed,
}

#[cfg(test)]
#[test]
fn test_neighbors_exclude_self() {
    let nbrs: Vec<_> = CellPos(5, 7).neighbors().collect();
    assert_eq!(nbrs.len(), 8);
    assert!(!nbrs.contains(&CellPos(5, 7)));
    for CellPos(x, y) in nbrs {
        assert!((x - 5).abs() <= 1 && (y - 7).abs() <= 1);
    }
}
