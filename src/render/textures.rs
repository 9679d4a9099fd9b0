use glium::texture::{MipmapsOption, RawImage2d, SrgbTexture2d};
use glium::Display;
use image::RgbaImage;
use std::path::Path;

use crate::RenderError;

/// Uploads an RGBA image as a texture.
pub fn texture_from_image(display: &Display, image: RgbaImage) -> Result<SrgbTexture2d, RenderError> {
    let dimensions = image.dimensions();
    let raw = RawImage2d::from_raw_rgba_reversed(&image.into_raw(), dimensions);
    Ok(SrgbTexture2d::with_mipmaps(
        display,
        raw,
        MipmapsOption::NoMipmap,
    )?)
}

/// Loads an image file and uploads it as a texture.
pub fn load_texture(display: &Display, path: &Path) -> Result<SrgbTexture2d, RenderError> {
    let image = image::open(path)
        .map_err(|source| RenderError::Asset {
            path: path.to_owned(),
            source,
        })?
        .to_rgba8();
    log::debug!("Loaded {} ({}x{})", path.display(), image.width(), image.height());
    texture_from_image(display, image)
}
