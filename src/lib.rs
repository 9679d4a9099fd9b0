//! Minesweeper with a simple 2D renderer and a textured OpenGL renderer.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

use std::time::Duration;

pub mod audio;
pub mod board;
mod error;
pub mod game;
pub mod gui;
pub mod render;

pub use error::{AppError, AudioError, RenderError};

/// Window title.
pub const TITLE: &str = "Mine sweeper";

/// Width of the window in logical pixels.
pub const WINDOW_WIDTH: u32 = 800;
/// Height of the window in logical pixels.
pub const WINDOW_HEIGHT: u32 = 600;
/// Width and height of one cell in logical pixels.
pub const CELL_SIZE: u32 = 50;

/// Width of the board in cells.
pub const GRID_WIDTH: usize = (WINDOW_WIDTH / CELL_SIZE) as usize;
/// Height of the board in cells.
pub const GRID_HEIGHT: usize = (WINDOW_HEIGHT / CELL_SIZE) as usize;
/// Number of mines on the board.
pub const MINES: usize = 26;

/// How long the revealed mine stays on screen before the window closes.
pub const GAME_OVER_DELAY: Duration = Duration::from_secs(3);

/// Directory holding the textures for the textured renderer.
pub const ASSET_DIR: &str = "textures";
/// Directory holding the sound effects.
pub const SFX_DIR: &str = "sfx";

/// Background color, visible behind revealed cells.
pub const CLEAR_COLOR: (f32, f32, f32, f32) = (0.51, 0.51, 0.51, 1.0);

/// Initializes logging to stderr. `RUST_LOG` overrides the default level.
pub fn init_logging() {
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .with_utc_timestamps()
        .env()
        .init()
    {
        eprintln!("Failed to initialize logger: {}", e);
    }
}

/// Logs a warning when the process runs with root privileges.
pub fn warn_if_root() {
    if is_root() {
        log::warn!("Running as root is not recommended");
    }
}

#[cfg(unix)]
fn is_root() -> bool {
    nix::unistd::Uid::effective().is_root()
}
#[cfg(not(unix))]
fn is_root() -> bool {
    false
}
