use glium::texture::SrgbTexture2d;
use glium::{Display, Frame};
use image::{Rgba, RgbaImage};

use super::quad::{QuadPipeline, SpriteBatch};
use super::{textures, CellRenderer, Sprite};
use crate::board::{CellPos, CellView};
use crate::RenderError;

/// Width and height of one sprite in the generated atlas, in pixels.
const SPRITE_PX: u32 = 16;

/// Sprites in atlas order, left to right.
const ATLAS_SPRITES: [Sprite; 12] = [
    Sprite::Covered,
    Sprite::Open,
    Sprite::Flag,
    Sprite::Mine,
    Sprite::Number(1),
    Sprite::Number(2),
    Sprite::Number(3),
    Sprite::Number(4),
    Sprite::Number(5),
    Sprite::Number(6),
    Sprite::Number(7),
    Sprite::Number(8),
];

/// 3x5 digit glyphs for 1 through 8, one row per byte, MSB on the left.
const DIGITS: [[u8; 5]; 8] = [
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
];

/// Classic digit colors for 1 through 8.
const DIGIT_COLORS: [[u8; 3]; 8] = [
    [0, 0, 255],
    [0, 123, 0],
    [255, 0, 0],
    [0, 0, 123],
    [123, 0, 0],
    [0, 123, 123],
    [0, 0, 0],
    [123, 123, 123],
];

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FACE: Rgba<u8> = Rgba([189, 189, 189, 255]);
const SHADOW: Rgba<u8> = Rgba([123, 123, 123, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Renderer that draws from a generated sprite atlas, needing no asset files.
///
/// The whole board is drawn with a single instanced draw call.
pub struct SimpleRenderer {
    pipeline: QuadPipeline,
    atlas: SrgbTexture2d,
    batch: SpriteBatch,
}
impl SimpleRenderer {
    /// Builds the atlas and uploads it.
    pub fn new(display: &Display) -> Result<Self, RenderError> {
        Ok(Self {
            pipeline: QuadPipeline::new(display, crate::CELL_SIZE)?,
            atlas: textures::texture_from_image(display, build_atlas())?,
            batch: SpriteBatch::default(),
        })
    }
}
impl CellRenderer for SimpleRenderer {
    fn draw_cell(&mut self, pos: CellPos, view: CellView) {
        self.batch.push(pos, view);
    }

    fn flush(
        &mut self,
        display: &Display,
        target: &mut Frame,
        projection: [[f32; 4]; 4],
    ) -> Result<(), RenderError> {
        let pipeline = &self.pipeline;
        let instances: Vec<_> = self
            .batch
            .take()
            .flat_map(|(sprite, cells)| {
                let offset = [atlas_index(sprite) as f32 / ATLAS_SPRITES.len() as f32, 0.0];
                cells.into_iter().map(move |pos| pipeline.instance(pos, offset))
            })
            .collect();
        let sprite_size = [1.0 / ATLAS_SPRITES.len() as f32, 1.0];
        pipeline.draw(display, target, &self.atlas, sprite_size, projection, &instances)
    }
}

/// Returns the position of a sprite in the atlas.
fn atlas_index(sprite: Sprite) -> usize {
    match sprite {
        Sprite::Covered => 0,
        Sprite::Open => 1,
        Sprite::Flag => 2,
        Sprite::Mine => 3,
        Sprite::Number(n) => 3 + n.max(1).min(8) as usize,
    }
}

/// Paints every sprite into a single row.
fn build_atlas() -> RgbaImage {
    RgbaImage::from_fn(
        SPRITE_PX * ATLAS_SPRITES.len() as u32,
        SPRITE_PX,
        |x, y| sprite_pixel(ATLAS_SPRITES[(x / SPRITE_PX) as usize], x % SPRITE_PX, y),
    )
}

fn sprite_pixel(sprite: Sprite, x: u32, y: u32) -> Rgba<u8> {
    let last = SPRITE_PX - 1;
    match sprite {
        Sprite::Covered => {
            if x >= last - 1 || y >= last - 1 {
                SHADOW
            } else if x < 2 || y < 2 {
                LIGHT
            } else {
                FACE
            }
        }
        Sprite::Open => {
            if x == 0 || y == 0 {
                SHADOW
            } else {
                FACE
            }
        }
        Sprite::Flag => {
            let d = (y as i32 - 4).abs() as u32;
            if (2..=6).contains(&y) && x >= 3 + 2 * d && x <= 8 {
                RED
            } else if x == 9 && (2..=12).contains(&y) {
                BLACK
            } else if (11..=12).contains(&y) && (5..=12).contains(&x) {
                BLACK
            } else {
                CLEAR
            }
        }
        Sprite::Mine => {
            let (dx, dy) = (x as f32 - 7.5, y as f32 - 7.5);
            let spike = ((7..=8).contains(&x) && (1..=14).contains(&y))
                || ((7..=8).contains(&y) && (1..=14).contains(&x));
            if (5..=6).contains(&x) && (5..=6).contains(&y) {
                LIGHT
            } else if dx * dx + dy * dy <= 25.0 || spike {
                BLACK
            } else {
                CLEAR
            }
        }
        Sprite::Number(n) => {
            let n = n.max(1).min(8) as usize;
            // Glyphs are drawn at 2x, centered.
            let (x0, y0) = (5, 3);
            if x < x0 || y < y0 {
                return CLEAR;
            }
            let (fx, fy) = ((x - x0) / 2, (y - y0) / 2);
            if digit_pixel(n, fx, fy) {
                let [r, g, b] = DIGIT_COLORS[n - 1];
                Rgba([r, g, b, 255])
            } else {
                CLEAR
            }
        }
    }
}

/// Returns whether a pixel of the 3x5 glyph for `n` is set.
fn digit_pixel(n: usize, fx: u32, fy: u32) -> bool {
    if fx >= 3 || fy >= 5 || !(1..=8).contains(&n) {
        return false;
    }
    DIGITS[n - 1][fy as usize] >> (2 - fx) & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_layout() {
        let atlas = build_atlas();
        assert_eq!(atlas.dimensions(), (SPRITE_PX * 12, SPRITE_PX));
        for (i, &sprite) in ATLAS_SPRITES.iter().enumerate() {
            assert_eq!(atlas_index(sprite), i);
        }
    }

    #[test]
    fn test_atlas_pixels() {
        let atlas = build_atlas();
        let at = |sprite, x, y| *atlas.get_pixel(atlas_index(sprite) as u32 * SPRITE_PX + x, y);

        assert_eq!(at(Sprite::Covered, 0, 0), LIGHT);
        assert_eq!(at(Sprite::Covered, 15, 15), SHADOW);
        assert_eq!(at(Sprite::Covered, 8, 8), FACE);
        assert_eq!(at(Sprite::Open, 0, 8), SHADOW);
        assert_eq!(at(Sprite::Open, 8, 8), FACE);

        // Foreground sprites are transparent at the corners.
        for &sprite in &[Sprite::Flag, Sprite::Mine, Sprite::Number(4)] {
            assert_eq!(at(sprite, 0, 0), CLEAR);
            assert_eq!(at(sprite, 15, 15), CLEAR);
        }
        assert_eq!(at(Sprite::Flag, 8, 4), RED);
        assert_eq!(at(Sprite::Mine, 8, 8), BLACK);
        // Top of the "1" stem, drawn at 2x from (5, 3).
        assert_eq!(at(Sprite::Number(1), 7, 3), Rgba([0, 0, 255, 255]));
        assert_eq!(at(Sprite::Number(1), 5, 3), CLEAR);
    }

    #[test]
    fn test_digit_glyphs() {
        // "7" has a full top bar and a right column.
        assert!((0..3).all(|fx| digit_pixel(7, fx, 0)));
        assert!((0..5).all(|fy| digit_pixel(7, 2, fy)));
        assert!(!digit_pixel(7, 0, 4));
        // "8" has a hole in each half.
        assert!(!digit_pixel(8, 1, 1));
        assert!(!digit_pixel(8, 1, 3));
        assert!(digit_pixel(8, 1, 2));
        // Out of range.
        assert!(!digit_pixel(0, 0, 0));
        assert!(!digit_pixel(3, 3, 0));
        assert!(!digit_pixel(3, 0, 5));
    }
}
