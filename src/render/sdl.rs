use std::path::Path;

use sdl2::pixels::PixelFormatEnum;
use sdl2::surface::Surface;
use tracing::debug;

use crate::error::LoadError;
use crate::pixels::Color;

use super::Backend;

/// Backend producing SDL surfaces converted for a window.
///
/// Needs an open window, so the video subsystem is always initialized by the
/// time an image is converted.
#[derive(Copy, Clone, Debug)]
pub struct SdlBackend {
    display_format: PixelFormatEnum,
}

impl SdlBackend {
    pub fn new(window: &sdl2::video::Window) -> Self {
        Self::with_format(window.window_pixel_format())
    }

    /// Backend converting for a display with the given native format.
    pub fn with_format(display_format: PixelFormatEnum) -> Self {
        Self { display_format }
    }

    pub fn display_format(&self) -> PixelFormatEnum {
        self.display_format
    }
}

/// Display format with its alpha channel dropped, for colorkeyed surfaces.
fn opaque_format(format: PixelFormatEnum) -> PixelFormatEnum {
    match format {
        PixelFormatEnum::ARGB8888 | PixelFormatEnum::ARGB2101010 => PixelFormatEnum::RGB888,
        PixelFormatEnum::RGBA8888 => PixelFormatEnum::RGBX8888,
        PixelFormatEnum::ABGR8888 => PixelFormatEnum::BGR888,
        PixelFormatEnum::BGRA8888 => PixelFormatEnum::BGRX8888,
        PixelFormatEnum::ARGB1555 | PixelFormatEnum::RGBA5551 => PixelFormatEnum::RGB555,
        PixelFormatEnum::ABGR1555 | PixelFormatEnum::BGRA5551 => PixelFormatEnum::BGR555,
        PixelFormatEnum::ARGB4444 | PixelFormatEnum::RGBA4444 => PixelFormatEnum::RGB444,
        PixelFormatEnum::ABGR4444 | PixelFormatEnum::BGRA4444 => PixelFormatEnum::BGR444,
        other if other.supports_alpha() => PixelFormatEnum::RGB888,
        other => other,
    }
}

fn to_sdl(c: Color) -> sdl2::pixels::Color {
    sdl2::pixels::Color::RGBA(c.r, c.g, c.b, c.a)
}

impl Backend for SdlBackend {
    type Surface = Surface<'static>;

    fn decode_image_file(&self, path: &Path) -> Result<Surface<'static>, LoadError> {
        let rgba = super::decode_file(path)?.to_rgba8();
        let (width, height) = rgba.dimensions();

        let mut surface = Surface::new(width, height, PixelFormatEnum::ARGB8888).map_err(LoadError::Backend)?;
        let format = surface.pixel_format();
        let pitch = surface.pitch() as usize;

        surface.with_lock_mut(|bytes| {
            for (x, y, px) in rgba.enumerate_pixels() {
                let [r, g, b, a] = px.0;
                let raw = sdl2::pixels::Color::RGBA(r, g, b, a).to_u32(&format);
                let at = y as usize * pitch + x as usize * 4;
                bytes[at..at + 4].copy_from_slice(&raw.to_ne_bytes());
            }
        });

        debug!(path = %path.display(), width, height, "decoded image into SDL surface");
        Ok(surface)
    }

    fn convert_to_display_format(&self, surface: Surface<'static>, with_alpha: bool) -> Result<Surface<'static>, LoadError> {
        let target = if with_alpha {
            PixelFormatEnum::ARGB8888
        } else {
            opaque_format(self.display_format)
        };

        surface.convert_format(target).map_err(LoadError::Backend)
    }

    fn get_pixel(&self, surface: &Surface<'static>, x: u32, y: u32) -> Result<Color, LoadError> {
        if x >= surface.width() || y >= surface.height() {
            return Err(LoadError::OutOfBounds {
                x,
                y,
                width: surface.width(),
                height: surface.height(),
            });
        }

        let bpp = surface.pixel_format_enum().byte_size_per_pixel();
        let at = y as usize * surface.pitch() as usize + x as usize * bpp;
        let raw = surface.with_lock(|bytes| {
            let mut buf = [0u8; 4];
            buf[..bpp].copy_from_slice(&bytes[at..at + bpp]);
            u32::from_ne_bytes(buf)
        });

        let c = sdl2::pixels::Color::from_u32(&surface.pixel_format(), raw);
        Ok(Color::rgba(c.r, c.g, c.b, c.a))
    }

    fn set_color_key(&self, surface: &mut Surface<'static>, key: Color, accelerated: bool) -> Result<(), LoadError> {
        surface.set_color_key(true, to_sdl(key)).map_err(LoadError::Backend)?;
        if accelerated {
            surface.enable_RLE();
        }
        Ok(())
    }
}
