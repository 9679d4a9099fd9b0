//! Minesweeper board state and the reveal/flag transitions.

use rand::Rng;

mod cell;

pub use cell::{CellPos, CellState, CellView, FlagOutcome, RevealOutcome};

/// Rectangular Minesweeper board.
///
/// All per-cell data is stored row-major in flat buffers indexed by
/// `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,

    /// Mine presence, fixed once the board is built.
    mines: Vec<bool>,
    /// Visibility state.
    cells: Vec<CellState>,
    /// Flag counter for each cell; 1 while flagged, 0 otherwise.
    flags: Vec<u8>,

    mine_count: usize,
    flagged_count: usize,
    revealed_count: usize,

    /// Mine that ended the game, if any.
    exploded: Option<CellPos>,
}
impl Board {
    /// Returns a new board with `mine_count` mines at random positions.
    pub fn new(width: usize, height: usize, mine_count: usize) -> Self {
        Self::with_rng(width, height, mine_count, &mut rand::thread_rng())
    }
    /// Returns a new board with `mine_count` mines at positions drawn from
    /// `rng`.
    ///
    /// At least one cell is always left safe, so `mine_count` is clamped to
    /// one less than the number of cells.
    pub fn with_rng<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        mine_count: usize,
        rng: &mut R,
    ) -> Self {
        let total = width * height;
        let max_mines = total.saturating_sub(1);
        let mine_count = if mine_count > max_mines {
            log::warn!(
                "Requested {} mines but a {}x{} board only fits {}",
                mine_count,
                width,
                height,
                max_mines,
            );
            max_mines
        } else {
            mine_count
        };

        let mut mines = vec![false; total];
        for i in rand::seq::index::sample(rng, total, mine_count).iter() {
            mines[i] = true;
        }
        Self::from_mine_map(width, height, mines)
    }
    /// Returns a new board with mines at exactly the given positions.
    /// Duplicates and out-of-bounds positions are ignored.
    pub fn with_mines(
        width: usize,
        height: usize,
        positions: impl IntoIterator<Item = CellPos>,
    ) -> Self {
        let mut mines = vec![false; width * height];
        for pos in positions {
            if let Some(i) = index_of(width, height, pos) {
                mines[i] = true;
            }
        }
        Self::from_mine_map(width, height, mines)
    }
    fn from_mine_map(width: usize, height: usize, mines: Vec<bool>) -> Self {
        let total = width * height;
        let mine_count = mines.iter().filter(|&&m| m).count();
        Self {
            width,
            height,

            mines,
            cells: vec![CellState::Hidden; total],
            flags: vec![0; total],

            mine_count,
            flagged_count: 0,
            revealed_count: 0,

            exploded: None,
        }
    }

    /// Returns the width of the board in cells.
    pub fn width(&self) -> usize {
        self.width
    }
    /// Returns the height of the board in cells.
    pub fn height(&self) -> usize {
        self.height
    }
    /// Returns the number of mines on the board.
    pub fn mine_count(&self) -> usize {
        self.mine_count
    }
    /// Returns the number of cells currently flagged.
    pub fn flagged_count(&self) -> usize {
        self.flagged_count
    }
    /// Returns the number of cells revealed so far, including an exploded
    /// mine.
    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    /// Returns `true` if a mine has been revealed.
    pub fn is_game_over(&self) -> bool {
        self.exploded.is_some()
    }
    /// Returns the position of the mine that ended the game.
    pub fn exploded_at(&self) -> Option<CellPos> {
        self.exploded
    }

    /// Returns `true` if `pos` is on the board.
    pub fn contains(&self, pos: CellPos) -> bool {
        self.index(pos).is_some()
    }
    fn index(&self, pos: CellPos) -> Option<usize> {
        index_of(self.width, self.height, pos)
    }

    /// Returns an iterator over every position on the board, row by row.
    pub fn positions(&self) -> impl Iterator<Item = CellPos> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| CellPos(x, y)))
    }

    /// Returns `true` if there is a mine at `pos`.
    pub fn has_mine(&self, pos: CellPos) -> bool {
        self.index(pos).map_or(false, |i| self.mines[i])
    }
    /// Returns the state of a cell. Positions outside the board are
    /// `Hidden`.
    pub fn cell_state(&self, pos: CellPos) -> CellState {
        self.index(pos).map_or(CellState::Hidden, |i| self.cells[i])
    }
    /// Returns the flag counter of a cell.
    pub fn flag_count(&self, pos: CellPos) -> u8 {
        self.index(pos).map_or(0, |i| self.flags[i])
    }

    /// Returns the number of mines among the neighbors of `pos`. The cell
    /// itself is not counted.
    pub fn adjacent_mine_count(&self, pos: CellPos) -> u8 {
        pos.neighbors().filter(|&nbr| self.has_mine(nbr)).count() as u8
    }

    /// Returns how a cell should be drawn.
    pub fn cell_view(&self, pos: CellPos) -> CellView {
        match self.cell_state(pos) {
            CellState::Hidden => CellView::Hidden,
            CellState::Flagged => CellView::Flagged,
            CellState::Revealed if self.has_mine(pos) => CellView::Exploded,
            CellState::Revealed => CellView::Revealed(self.adjacent_mine_count(pos)),
        }
    }

    /// Reveals a hidden cell, cascading through zero-count regions.
    ///
    /// Flagged cells are never revealed, either directly or by a cascade.
    pub fn reveal(&mut self, pos: CellPos) -> RevealOutcome {
        if self.is_game_over() {
            return RevealOutcome::NoChange;
        }
        let i = match self.index(pos) {
            Some(i) if self.cells[i] == CellState::Hidden => i,
            _ => return RevealOutcome::NoChange,
        };

        self.cells[i] = CellState::Revealed;
        self.revealed_count += 1;
        if self.mines[i] {
            self.exploded = Some(pos);
            return RevealOutcome::Exploded;
        }

        // Cells are marked revealed when pushed, so each is visited once.
        let mut revealed = 1;
        let mut stack = vec![pos];
        while let Some(p) = stack.pop() {
            if self.adjacent_mine_count(p) != 0 {
                continue;
            }
            for nbr in p.neighbors() {
                if let Some(j) = self.index(nbr) {
                    if self.cells[j] == CellState::Hidden {
                        self.cells[j] = CellState::Revealed;
                        revealed += 1;
                        stack.push(nbr);
                    }
                }
            }
        }
        self.revealed_count += revealed - 1;

        RevealOutcome::Revealed(revealed)
    }

    /// Toggles the flag on a hidden or flagged cell.
    pub fn toggle_flag(&mut self, pos: CellPos) -> FlagOutcome {
        if self.is_game_over() {
            return FlagOutcome::NoChange;
        }
        let i = match self.index(pos) {
            Some(i) => i,
            None => return FlagOutcome::NoChange,
        };

        match self.cells[i] {
            CellState::Hidden => {
                self.cells[i] = CellState::Flagged;
                self.flags[i] += 1;
                self.flagged_count += 1;
                FlagOutcome::Placed
            }
            CellState::Flagged => {
                self.cells[i] = CellState::Hidden;
                self.flags[i] -= 1;
                self.flagged_count -= 1;
                FlagOutcome::Removed
            }
            CellState::Revealed => FlagOutcome::NoChange,
        }
    }
}

/// Returns the flat index of `pos` on a `width` by `height` board.
fn index_of(width: usize, height: usize, CellPos(x, y): CellPos) -> Option<usize> {
    if x < 0 || y < 0 {
        return None;
    }
    let (x, y) = (x as usize, y as usize);
    if x < width && y < height {
        Some(y * width + x)
    } else {
        None
    }
}
