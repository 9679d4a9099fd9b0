//! Input handling and game session state.

use glium::glutin::event::{ElementState, MouseButton, WindowEvent};
use std::time::Instant;

mod input;

pub use input::{physical_to_logical, pixel_to_cell, Action};

use crate::audio::{Silent, Sound, SoundPlayer};
use crate::board::{Board, CellPos, FlagOutcome, RevealOutcome};

/// Game session: the board plus the input state that drives it.
pub struct Game {
    /// Cell grid.
    board: Board,
    /// Where sound effects go.
    sounds: Box<dyn SoundPlayer>,

    /// Position of the mouse cursor, in logical pixels.
    cursor_pos: Option<(f64, f64)>,
    /// Display scaling factor of the window.
    scale_factor: f64,

    /// When a mine was revealed.
    game_over_at: Option<Instant>,
}
impl Game {
    /// Returns a new game on `board` that plays no sounds.
    pub fn new(board: Board) -> Self {
        Self::with_sounds(board, Box::new(Silent))
    }
    /// Returns a new game on `board` that plays sound effects on `sounds`.
    pub fn with_sounds(board: Board, sounds: Box<dyn SoundPlayer>) -> Self {
        Self {
            board,
            sounds,

            cursor_pos: None,
            scale_factor: 1.0,

            game_over_at: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Sets the display scaling factor used to convert cursor positions.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    /// Updates the game from a window event.
    pub fn handle_event(&mut self, ev: &WindowEvent<'_>, now: Instant) {
        match ev {
            // Handle cursor events.
            WindowEvent::CursorMoved { position, .. } => {
                self.set_cursor_physical((position.x, position.y));
            }
            WindowEvent::CursorLeft { .. } => self.cursor_pos = None,

            // Handle mouse click.
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => self.handle_mouse_press(*button, now),

            _ => (),
        }
    }

    /// Updates the cursor position from physical pixels.
    pub fn set_cursor_physical(&mut self, pixel: (f64, f64)) {
        self.cursor_pos = Some(physical_to_logical(pixel, self.scale_factor));
    }

    /// Handles a mouse button press at the current cursor position.
    pub fn handle_mouse_press(&mut self, button: MouseButton, now: Instant) {
        let pixel = match self.cursor_pos {
            Some(pixel) => pixel,
            None => return,
        };
        if let Some(action) = Action::for_button(button) {
            let pos = pixel_to_cell(pixel, crate::CELL_SIZE);
            self.apply(action, pos, now);
        }
    }

    /// Applies an action to a cell.
    pub fn apply(&mut self, action: Action, pos: CellPos, now: Instant) {
        if !self.board.contains(pos) {
            return;
        }
        match action {
            Action::Reveal => match self.board.reveal(pos) {
                RevealOutcome::NoChange => (),
                RevealOutcome::Revealed(n) => {
                    log::debug!("Revealed {} cell(s) from {:?}", n, pos);
                    self.sounds.play(Sound::Break);
                }
                RevealOutcome::Exploded => {
                    log::info!("Mine revealed at {:?}, game over", pos);
                    self.sounds.play(Sound::Boom);
                    self.game_over_at = Some(now);
                }
            },
            Action::ToggleFlag => match self.board.toggle_flag(pos) {
                FlagOutcome::NoChange => (),
                outcome => log::debug!(
                    "Flag {:?} at {:?} ({} flagged)",
                    outcome,
                    pos,
                    self.board.flagged_count(),
                ),
            },
        }
    }

    /// Returns `true` once the game over screen has been shown long enough.
    pub fn should_close(&self, now: Instant) -> bool {
        match self.game_over_at {
            Some(t) => now.saturating_duration_since(t) >= crate::GAME_OVER_DELAY,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::board::{CellState, CellView};

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<Sound>>>);
    impl SoundPlayer for Recorder {
        fn play(&mut self, sound: Sound) {
            self.0.borrow_mut().push(sound);
        }
    }

    fn game() -> Game {
        Game::new(Board::with_mines(16, 12, vec![CellPos(0, 0), CellPos(15, 11)]))
    }

    #[test]
    fn test_click_reveals_cell_under_cursor() {
        let mut game = game();
        let now = Instant::now();
        game.set_cursor_physical((75.0, 25.0));
        game.handle_mouse_press(MouseButton::Left, now);
        assert_eq!(game.board().cell_view(CellPos(1, 0)), CellView::Revealed(1));
        assert_eq!(game.board().revealed_count(), 1);
    }

    #[test]
    fn test_click_respects_scale_factor() {
        let mut game = game();
        let now = Instant::now();
        game.set_scale_factor(2.0);
        game.set_cursor_physical((150.0, 50.0));
        game.handle_mouse_press(MouseButton::Right, now);
        assert_eq!(game.board().cell_state(CellPos(1, 0)), CellState::Flagged);
    }

    #[test]
    fn test_click_without_cursor_is_ignored() {
        let mut game = game();
        game.handle_mouse_press(MouseButton::Left, Instant::now());
        assert_eq!(game.board().revealed_count(), 0);
    }

    #[test]
    fn test_click_outside_board_is_ignored() {
        let mut game = game();
        game.set_cursor_physical((900.0, 10.0));
        game.handle_mouse_press(MouseButton::Left, Instant::now());
        assert_eq!(game.board().revealed_count(), 0);
    }

    #[test]
    fn test_game_over_closes_after_delay() {
        let mut game = game();
        let now = Instant::now();
        assert!(!game.should_close(now));
        game.apply(Action::Reveal, CellPos(15, 11), now);
        assert!(game.board().is_game_over());
        assert!(!game.should_close(now));
        assert!(!game.should_close(now + Duration::from_millis(2999)));
        assert!(game.should_close(now + crate::GAME_OVER_DELAY));

        // Input after game over does nothing.
        game.apply(Action::ToggleFlag, CellPos(5, 5), now);
        assert_eq!(game.board().cell_state(CellPos(5, 5)), CellState::Hidden);
    }

    #[test]
    fn test_sounds_follow_reveal_outcomes() {
        let played = Recorder::default();
        let board = Board::with_mines(16, 12, vec![CellPos(0, 0), CellPos(15, 11)]);
        let mut game = Game::with_sounds(board, Box::new(played.clone()));
        let now = Instant::now();

        game.apply(Action::Reveal, CellPos(1, 0), now);
        // Revealing the same cell again and flagging are silent.
        game.apply(Action::Reveal, CellPos(1, 0), now);
        game.apply(Action::ToggleFlag, CellPos(2, 2), now);
        assert_eq!(*played.0.borrow(), vec![Sound::Break]);

        game.apply(Action::Reveal, CellPos(0, 0), now);
        assert_eq!(*played.0.borrow(), vec![Sound::Break, Sound::Boom]);

        // Nothing plays once the game is over.
        game.apply(Action::Reveal, CellPos(15, 11), now);
        assert_eq!(played.0.borrow().len(), 2);
    }
}
