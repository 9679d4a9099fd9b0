//! Rendering backends for the board.

use glium::{Display, Frame};

mod quad;
mod shaders;
mod simple;
mod textured;
mod textures;

pub use simple::SimpleRenderer;
pub use textured::TexturedRenderer;

use crate::board::{Board, CellPos, CellView};
use crate::RenderError;

/// Backend capable of drawing board cells.
pub trait CellRenderer {
    /// Queues one cell to be drawn at `pos`.
    fn draw_cell(&mut self, pos: CellPos, view: CellView);
    /// Draws every queued cell to `target` and clears the queue.
    fn flush(
        &mut self,
        display: &Display,
        target: &mut Frame,
        projection: [[f32; 4]; 4],
    ) -> Result<(), RenderError>;
}

/// Queues every cell on the board.
pub fn draw_board<R: CellRenderer + ?Sized>(renderer: &mut R, board: &Board) {
    for pos in board.positions() {
        renderer.draw_cell(pos, board.cell_view(pos));
    }
}

/// Returns the orthographic projection from logical window pixels, with the
/// origin at the top left and Y pointing down.
pub fn projection_matrix() -> [[f32; 4]; 4] {
    let w = crate::WINDOW_WIDTH as f32;
    let h = crate::WINDOW_HEIGHT as f32;
    cgmath::ortho(0.0, w, h, 0.0, -1.0, 1.0).into()
}

/// Image layer of a cell. Background sprites sort before foreground ones.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sprite {
    /// Raised, unrevealed cell.
    Covered,
    /// Flat, revealed cell.
    Open,
    /// Flag marker.
    Flag,
    /// Mine.
    Mine,
    /// Adjacent mine count, from 1 to 8.
    Number(u8),
}
impl Sprite {
    /// Returns the background and optional foreground sprite for a cell.
    pub fn layers(view: CellView) -> (Sprite, Option<Sprite>) {
        match view {
            CellView::Hidden => (Sprite::Covered, None),
            CellView::Flagged => (Sprite::Covered, Some(Sprite::Flag)),
            CellView::Revealed(0) => (Sprite::Open, None),
            CellView::Revealed(n) => (Sprite::Open, Some(Sprite::Number(n))),
            CellView::Exploded => (Sprite::Open, Some(Sprite::Mine)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(CellPos, CellView)>);
    impl CellRenderer for Recorder {
        fn draw_cell(&mut self, pos: CellPos, view: CellView) {
            self.0.push((pos, view));
        }
        fn flush(&mut self, _: &Display, _: &mut Frame, _: [[f32; 4]; 4]) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn test_layers() {
        assert_eq!(Sprite::layers(CellView::Hidden), (Sprite::Covered, None));
        assert_eq!(
            Sprite::layers(CellView::Flagged),
            (Sprite::Covered, Some(Sprite::Flag)),
        );
        assert_eq!(Sprite::layers(CellView::Revealed(0)), (Sprite::Open, None));
        assert_eq!(
            Sprite::layers(CellView::Revealed(3)),
            (Sprite::Open, Some(Sprite::Number(3))),
        );
        assert_eq!(
            Sprite::layers(CellView::Exploded),
            (Sprite::Open, Some(Sprite::Mine)),
        );
    }

    #[test]
    fn test_backgrounds_sort_first() {
        for fg in &[Sprite::Flag, Sprite::Mine, Sprite::Number(1), Sprite::Number(8)] {
            assert!(Sprite::Covered < *fg);
            assert!(Sprite::Open < *fg);
        }
    }

    #[test]
    fn test_draw_board_visits_every_cell() {
        let mut board = Board::with_mines(3, 2, vec![CellPos(0, 0)]);
        board.toggle_flag(CellPos(0, 0));
        board.reveal(CellPos(2, 1));

        let mut recorder = Recorder::default();
        draw_board(&mut recorder, &board);
        assert_eq!(recorder.0.len(), 6);
        assert_eq!(recorder.0[0], (CellPos(0, 0), CellView::Flagged));
        assert_eq!(recorder.0[4], (CellPos(1, 1), CellView::Revealed(1)));
        assert_eq!(recorder.0[5], (CellPos(2, 1), CellView::Revealed(0)));
    }

    #[test]
    fn test_projection_maps_window_corners() {
        use cgmath::{Matrix4, Vector4};

        let m: Matrix4<f32> = projection_matrix().into();
        let top_left = m * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let bottom_right = m * Vector4::new(
            crate::WINDOW_WIDTH as f32,
            crate::WINDOW_HEIGHT as f32,
            0.0,
            1.0,
        );
        assert!((top_left.x + 1.0).abs() < 1e-6 && (top_left.y - 1.0).abs() < 1e-6);
        assert!((bottom_right.x - 1.0).abs() < 1e-6 && (bottom_right.y + 1.0).abs() < 1e-6);
    }
}
