//! Minesweeper drawn from a generated sprite atlas.

use minesweeper::render::SimpleRenderer;

fn main() {
    minesweeper::init_logging();
    minesweeper::warn_if_root();

    if let Err(e) = minesweeper::gui::run(SimpleRenderer::new) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
