use glium::glutin::event::MouseButton;

use crate::board::CellPos;

/// Player action on a single cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Uncover the cell.
    Reveal,
    /// Place or remove a flag.
    ToggleFlag,
}
impl Action {
    /// Returns the action bound to a mouse button, if any.
    pub fn for_button(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(Action::Reveal),
            MouseButton::Right => Some(Action::ToggleFlag),
            MouseButton::Middle | MouseButton::Other(_) => None,
        }
    }
}

/// Returns the cell containing a point given in logical pixels.
///
/// Points above or to the left of the window land on negative cells, which
/// the board treats as out of bounds.
pub fn pixel_to_cell((x, y): (f64, f64), cell_size: u32) -> CellPos {
    let cell_size = cell_size as f64;
    CellPos(
        (x / cell_size).floor() as i32,
        (y / cell_size).floor() as i32,
    )
}

/// Converts a physical cursor position to logical pixels.
pub fn physical_to_logical((x, y): (f64, f64), scale_factor: f64) -> (f64, f64) {
    if scale_factor > 0.0 {
        (x / scale_factor, y / scale_factor)
    } else {
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_cell() {
        assert_eq!(pixel_to_cell((0.0, 0.0), 50), CellPos(0, 0));
        assert_eq!(pixel_to_cell((49.9, 49.9), 50), CellPos(0, 0));
        assert_eq!(pixel_to_cell((50.0, 120.0), 50), CellPos(1, 2));
        assert_eq!(pixel_to_cell((799.0, 599.0), 50), CellPos(15, 11));
        assert_eq!(pixel_to_cell((-0.5, 10.0), 50), CellPos(-1, 0));
    }

    #[test]
    fn test_physical_to_logical() {
        assert_eq!(physical_to_logical((200.0, 100.0), 2.0), (100.0, 50.0));
        assert_eq!(physical_to_logical((200.0, 100.0), 1.0), (200.0, 100.0));
        assert_eq!(physical_to_logical((200.0, 100.0), 0.0), (200.0, 100.0));
    }

    #[test]
    fn test_button_bindings() {
        assert_eq!(Action::for_button(MouseButton::Left), Some(Action::Reveal));
        assert_eq!(
            Action::for_button(MouseButton::Right),
            Some(Action::ToggleFlag),
        );
        assert_eq!(Action::for_button(MouseButton::Middle), None);
        assert_eq!(Action::for_button(MouseButton::Other(4)), None);
    }
}
