use std::path::PathBuf;
use thiserror::Error;

/// Failure to set up or submit GPU resources.
#[derive(Error, Debug)]
pub enum RenderError {
    /// An image file could not be read or decoded.
    #[error("Failed to load texture {}: {source}", .path.display())]
    Asset {
        /// File that failed to load.
        path: PathBuf,
        /// Decoder error.
        source: image::ImageError,
    },
    /// The sprite program failed to compile or link.
    #[error("Failed to compile shader: {0}")]
    Shader(#[from] glium::program::ProgramChooserCreationError),
    /// A vertex or instance buffer could not be allocated.
    #[error("Failed to create vertex buffer: {0}")]
    Buffer(#[from] glium::vertex::BufferCreationError),
    /// A texture could not be uploaded.
    #[error("Failed to create texture: {0}")]
    Texture(#[from] glium::texture::TextureCreationError),
    /// The GL context cannot draw instanced geometry.
    #[error("Instanced rendering is not supported")]
    InstancingUnsupported,
    /// A draw call was rejected.
    #[error("Failed to draw: {0}")]
    Draw(#[from] glium::DrawError),
}

/// Failure to open the audio output or load a sound.
#[derive(Error, Debug)]
pub enum AudioError {
    /// No output device could be opened.
    #[error("Failed to open audio output: {0}")]
    Stream(#[from] rodio::StreamError),
    /// A sound file could not be read.
    #[error("Failed to read sound {}: {source}", .path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// I/O error.
        source: std::io::Error,
    },
    /// A sound file could not be decoded.
    #[error("Failed to decode sound {}: {source}", .path.display())]
    Decode {
        /// File that failed to decode.
        path: PathBuf,
        /// Decoder error.
        source: rodio::decoder::DecoderError,
    },
}

/// Failure of the windowed application.
#[derive(Error, Debug)]
pub enum AppError {
    /// The window or GL context could not be created.
    #[error("Failed to initialize display: {0}")]
    Display(#[from] glium::backend::glutin::DisplayCreationError),
    /// Presenting a frame failed.
    #[error("Failed to swap buffers: {0}")]
    SwapBuffers(#[from] glium::SwapBuffersError),
    /// Renderer setup or drawing failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}
