//! Minesweeper drawn with textures loaded from disk.

use std::path::Path;

use minesweeper::render::TexturedRenderer;

fn main() {
    minesweeper::init_logging();
    minesweeper::warn_if_root();

    let assets = Path::new(minesweeper::ASSET_DIR);
    if let Err(e) = minesweeper::gui::run(|display| TexturedRenderer::load(display, assets)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
