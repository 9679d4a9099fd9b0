use glium::program::ProgramChooserCreationError;
use glium::{program, Display, Program};

/// Compiles the program that draws instanced sprite quads.
pub fn sprite_program(display: &Display) -> Result<Program, ProgramChooserCreationError> {
    program!(
        display,
        140 => {
            vertex: include_str!("sprite.vert"),
            fragment: include_str!("sprite.frag"),
            outputs_srgb: false,
        },
    )
}
