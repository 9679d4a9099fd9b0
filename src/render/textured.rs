use glium::texture::SrgbTexture2d;
use glium::{Display, Frame};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::quad::{QuadPipeline, SpriteBatch};
use super::{textures, CellRenderer, Sprite};
use crate::board::{CellPos, CellView};
use crate::RenderError;

/// Textures that must be present in the asset directory.
const REQUIRED_TEXTURES: &[(Sprite, &str)] = &[
    (Sprite::Covered, "cube"),
    (Sprite::Flag, "flag"),
    (Sprite::Mine, "mine"),
    (Sprite::Number(1), "one"),
    (Sprite::Number(2), "two"),
    (Sprite::Number(3), "three"),
    (Sprite::Number(4), "four"),
    (Sprite::Number(5), "five"),
];
/// Textures that are drawn if present.
const OPTIONAL_TEXTURES: &[(Sprite, &str)] = &[
    (Sprite::Number(6), "six"),
    (Sprite::Number(7), "seven"),
    (Sprite::Number(8), "eight"),
];

/// Renderer that draws one bitmap per sprite, loaded from disk.
///
/// Sprites without a texture (including `Open`) are not drawn, leaving the
/// clear color visible.
pub struct TexturedRenderer {
    pipeline: QuadPipeline,
    textures: BTreeMap<Sprite, SrgbTexture2d>,
    batch: SpriteBatch,
}
impl TexturedRenderer {
    /// Loads textures from `dir`.
    pub fn load(display: &Display, dir: &Path) -> Result<Self, RenderError> {
        let mut textures = BTreeMap::new();
        for &(sprite, name) in REQUIRED_TEXTURES {
            textures.insert(sprite, textures::load_texture(display, &texture_path(dir, name))?);
        }
        for &(sprite, name) in OPTIONAL_TEXTURES {
            let path = texture_path(dir, name);
            if path.exists() {
                textures.insert(sprite, textures::load_texture(display, &path)?);
            } else {
                log::warn!("Missing {}, {:?} will not be drawn", path.display(), sprite);
            }
        }
        log::info!("Loaded {} textures from {}", textures.len(), dir.display());

        Ok(Self {
            pipeline: QuadPipeline::new(display, crate::CELL_SIZE)?,
            textures,
            batch: SpriteBatch::default(),
        })
    }
}
impl CellRenderer for TexturedRenderer {
    fn draw_cell(&mut self, pos: CellPos, view: CellView) {
        self.batch.push(pos, view);
    }

    fn flush(
        &mut self,
        display: &Display,
        target: &mut Frame,
        projection: [[f32; 4]; 4],
    ) -> Result<(), RenderError> {
        for (sprite, cells) in self.batch.take() {
            let texture = match self.textures.get(&sprite) {
                Some(t) => t,
                None => continue,
            };
            let instances: Vec<_> = cells
                .into_iter()
                .map(|pos| self.pipeline.instance(pos, [0.0, 0.0]))
                .collect();
            self.pipeline
                .draw(display, target, texture, [1.0, 1.0], projection, &instances)?;
        }
        Ok(())
    }
}

fn texture_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.bmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_foreground_has_a_texture_name() {
        let named = |sprite| {
            REQUIRED_TEXTURES
                .iter()
                .chain(OPTIONAL_TEXTURES)
                .any(|&(s, _)| s == sprite)
        };
        assert!(named(Sprite::Covered));
        assert!(named(Sprite::Flag));
        assert!(named(Sprite::Mine));
        for n in 1..=8 {
            assert!(named(Sprite::Number(n)));
        }
        assert!(!named(Sprite::Open));
    }

    #[test]
    fn test_texture_path() {
        assert_eq!(
            texture_path(Path::new("textures"), "cube"),
            Path::new("textures").join("cube.bmp"),
        );
    }
}
