use glium::index::{NoIndices, PrimitiveType};
use glium::texture::SrgbTexture2d;
use glium::uniforms::{MagnifySamplerFilter, MinifySamplerFilter};
use glium::{Display, Frame, Program, Surface, VertexBuffer};
use std::collections::BTreeMap;

use super::{shaders, Sprite};
use crate::board::{CellPos, CellView};
use crate::RenderError;

#[derive(Debug, Copy, Clone)]
struct Vertex2D {
    pos: [f32; 2],
}
glium::implement_vertex!(Vertex2D, pos);

/// Per-instance attributes of one sprite quad.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadInstance {
    /// Top left corner of the cell, in pixels.
    cell_origin: [f32; 2],
    /// Texture coordinates of the sprite's corner.
    sprite_offset: [f32; 2],
}
glium::implement_vertex!(QuadInstance, cell_origin, sprite_offset);

/// Cells queued for drawing, grouped by sprite in drawing order.
#[derive(Debug, Default, Clone)]
pub struct SpriteBatch(BTreeMap<Sprite, Vec<CellPos>>);
impl SpriteBatch {
    /// Queues the layers of one cell.
    pub fn push(&mut self, pos: CellPos, view: CellView) {
        let (bg, fg) = Sprite::layers(view);
        self.0.entry(bg).or_default().push(pos);
        if let Some(fg) = fg {
            self.0.entry(fg).or_default().push(pos);
        }
    }

    /// Removes and returns every queued group, backgrounds first.
    pub fn take(&mut self) -> impl Iterator<Item = (Sprite, Vec<CellPos>)> {
        std::mem::take(&mut self.0).into_iter()
    }
}

/// Unit quad and shader shared by both renderers.
pub struct QuadPipeline {
    quad: VertexBuffer<Vertex2D>,
    program: Program,
    cell_size: f32,
}
impl QuadPipeline {
    pub fn new(display: &Display, cell_size: u32) -> Result<Self, RenderError> {
        let quad = VertexBuffer::immutable(
            display,
            &[
                Vertex2D { pos: [0.0, 0.0] },
                Vertex2D { pos: [1.0, 0.0] },
                Vertex2D { pos: [0.0, 1.0] },
                Vertex2D { pos: [1.0, 1.0] },
            ],
        )?;
        let program = shaders::sprite_program(display)?;
        Ok(Self {
            quad,
            program,
            cell_size: cell_size as f32,
        })
    }

    /// Returns the instance attributes for a sprite drawn over a cell.
    pub fn instance(&self, CellPos(x, y): CellPos, sprite_offset: [f32; 2]) -> QuadInstance {
        QuadInstance {
            cell_origin: [x as f32 * self.cell_size, y as f32 * self.cell_size],
            sprite_offset,
        }
    }

    /// Draws one quad per instance, sampling `sprite_size` texture units
    /// from each instance's sprite offset.
    pub fn draw(
        &self,
        display: &Display,
        target: &mut Frame,
        texture: &SrgbTexture2d,
        sprite_size: [f32; 2],
        projection: [[f32; 4]; 4],
        instances: &[QuadInstance],
    ) -> Result<(), RenderError> {
        if instances.is_empty() {
            return Ok(());
        }

        let instance_buffer = VertexBuffer::new(display, instances)?;
        let per_instance = instance_buffer
            .per_instance()
            .map_err(|_| RenderError::InstancingUnsupported)?;

        let draw_params = glium::DrawParameters {
            blend: glium::Blend::alpha_blending(),
            ..glium::DrawParameters::default()
        };

        target.draw(
            (&self.quad, per_instance),
            &NoIndices(PrimitiveType::TriangleStrip),
            &self.program,
            &glium::uniform! {
                sprites: texture
                    .sampled()
                    .magnify_filter(MagnifySamplerFilter::Nearest)
                    .minify_filter(MinifySamplerFilter::Linear),
                sprite_size: sprite_size,
                cell_size: self.cell_size,
                projection: projection,
            },
            &draw_params,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_orders_backgrounds_first() {
        let mut batch = SpriteBatch::default();
        batch.push(CellPos(0, 0), CellView::Flagged);
        batch.push(CellPos(1, 0), CellView::Revealed(2));
        batch.push(CellPos(2, 0), CellView::Hidden);
        batch.push(CellPos(3, 0), CellView::Exploded);

        let groups: Vec<_> = batch.take().collect();
        assert_eq!(
            groups,
            vec![
                (Sprite::Covered, vec![CellPos(0, 0), CellPos(2, 0)]),
                (Sprite::Open, vec![CellPos(1, 0), CellPos(3, 0)]),
                (Sprite::Flag, vec![CellPos(0, 0)]),
                (Sprite::Mine, vec![CellPos(3, 0)]),
                (Sprite::Number(2), vec![CellPos(1, 0)]),
            ],
        );
        assert_eq!(batch.take().count(), 0);
    }
}
