//! Graphics backends.
//!
//! A [`Backend`] is the rendering context an image loader works against. It
//! decodes files into its own surface type and prepares them for blitting to
//! its display.

pub mod software;
#[cfg(feature = "sdl")]
pub mod sdl;

use std::path::Path;

use image::DynamicImage;

use crate::error::LoadError;
use crate::pixels::Color;

pub use software::SoftwareBackend;
#[cfg(feature = "sdl")]
pub use sdl::SdlBackend;

pub trait Backend {
    type Surface;

    /// Decodes an image file, sniffing its format from the content.
    fn decode_image_file(&self, path: &Path) -> Result<Self::Surface, LoadError>;

    /// Converts a surface to the display's native format, with or without a
    /// per-pixel alpha channel.
    fn convert_to_display_format(&self, surface: Self::Surface, with_alpha: bool) -> Result<Self::Surface, LoadError>;

    fn get_pixel(&self, surface: &Self::Surface, x: u32, y: u32) -> Result<Color, LoadError>;

    /// Marks `key` as the transparent color. `accelerated` asks for RLE blits.
    fn set_color_key(&self, surface: &mut Self::Surface, key: Color, accelerated: bool) -> Result<(), LoadError>;
}

impl<B: Backend + ?Sized> Backend for &B {
    type Surface = B::Surface;

    fn decode_image_file(&self, path: &Path) -> Result<Self::Surface, LoadError> {
        (**self).decode_image_file(path)
    }

    fn convert_to_display_format(&self, surface: Self::Surface, with_alpha: bool) -> Result<Self::Surface, LoadError> {
        (**self).convert_to_display_format(surface, with_alpha)
    }

    fn get_pixel(&self, surface: &Self::Surface, x: u32, y: u32) -> Result<Color, LoadError> {
        (**self).get_pixel(surface, x, y)
    }

    fn set_color_key(&self, surface: &mut Self::Surface, key: Color, accelerated: bool) -> Result<(), LoadError> {
        (**self).set_color_key(surface, key, accelerated)
    }
}

/// Reads and decodes an image file.
///
/// Missing or unreadable files are reported as [`LoadError::Io`] so callers
/// can tell them apart from undecodable content.
pub(crate) fn decode_file(path: &Path) -> Result<DynamicImage, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    image::load_from_memory(&bytes).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
