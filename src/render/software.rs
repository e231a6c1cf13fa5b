use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::pixels::{Color, PixelFormat};
use crate::surface::Surface;
use crate::window::DisplayMode;

use super::Backend;

/// Pure software backend producing [`Surface`]s.
///
/// Without a display mode the backend can still decode, but converting to the
/// display format fails with [`LoadError::BackendNotInitialized`].
#[derive(Clone, Debug, Default)]
pub struct SoftwareBackend {
    display: Option<DisplayMode>,
}

impl SoftwareBackend {
    pub fn new(display: DisplayMode) -> Self {
        Self { display: Some(display) }
    }

    pub fn headless() -> Self {
        Self { display: None }
    }

    pub fn display(&self) -> Option<&DisplayMode> {
        self.display.as_ref()
    }

    pub fn set_display(&mut self, display: Option<DisplayMode>) {
        self.display = display;
    }

    /// A blank surface matching the display, for use as a frame buffer.
    pub fn display_surface(&self) -> Result<Surface, LoadError> {
        let display = self.display.ok_or(LoadError::BackendNotInitialized)?;
        Ok(Surface::new(display.extent.x, display.extent.y, display.format))
    }
}

impl Backend for SoftwareBackend {
    type Surface = Surface;

    fn decode_image_file(&self, path: &Path) -> Result<Surface, LoadError> {
        let image = super::decode_file(path)?;
        let format = if image.color().has_alpha() {
            PixelFormat::Argb8888
        } else {
            PixelFormat::Xrgb8888
        };
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        debug!(path = %path.display(), width, height, ?format, "decoded image");

        // dimensions come from the decoder, the buffer length always matches
        Surface::from_rgba8(width as usize, height as usize, rgba.as_raw(), format)
            .ok_or_else(|| LoadError::Backend(format!("decoder returned a short buffer for {}", path.display())))
    }

    fn convert_to_display_format(&self, surface: Surface, with_alpha: bool) -> Result<Surface, LoadError> {
        let display = self.display.ok_or(LoadError::BackendNotInitialized)?;
        let target = if with_alpha {
            PixelFormat::Argb8888
        } else {
            display.format.without_alpha()
        };

        if surface.format() == target {
            return Ok(surface);
        }
        Ok(surface.convert(target))
    }

    fn get_pixel(&self, surface: &Surface, x: u32, y: u32) -> Result<Color, LoadError> {
        surface.get_at(x as usize, y as usize).ok_or(LoadError::OutOfBounds {
            x,
            y,
            width: surface.width() as u32,
            height: surface.height() as u32,
        })
    }

    fn set_color_key(&self, surface: &mut Surface, key: Color, accelerated: bool) -> Result<(), LoadError> {
        surface.set_colorkey(Some(key), accelerated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb565_backend() -> SoftwareBackend {
        SoftwareBackend::new(DisplayMode::new(320, 240, PixelFormat::Rgb565))
    }

    #[test]
    fn headless_refuses_conversion() {
        let backend = SoftwareBackend::headless();
        let surface = Surface::new(1, 1, PixelFormat::Xrgb8888);

        let err = backend.convert_to_display_format(surface, false).unwrap_err();
        assert!(matches!(err, LoadError::BackendNotInitialized));
        assert!(backend.display_surface().is_err());
    }

    #[test]
    fn conversion_targets() {
        let backend = rgb565_backend();
        let surface = Surface::new(2, 2, PixelFormat::Argb8888);

        let opaque = backend.convert_to_display_format(surface.clone(), false).unwrap();
        assert_eq!(opaque.format(), PixelFormat::Rgb565);

        let alpha = backend.convert_to_display_format(surface, true).unwrap();
        assert_eq!(alpha.format(), PixelFormat::Argb8888);
    }

    #[test]
    fn argb_display_drops_alpha_for_keyed_images() {
        let backend = SoftwareBackend::new(DisplayMode::new(8, 8, PixelFormat::Argb8888));
        let surface = Surface::new(2, 2, PixelFormat::Argb8888);

        let converted = backend.convert_to_display_format(surface, false).unwrap();
        assert_eq!(converted.format(), PixelFormat::Xrgb8888);
    }

    #[test]
    fn get_pixel_bounds() {
        let backend = rgb565_backend();
        let surface = Surface::new(2, 1, PixelFormat::Xrgb8888);

        assert_eq!(backend.get_pixel(&surface, 1, 0).unwrap(), Color::BLACK);
        assert!(matches!(
            backend.get_pixel(&surface, 0, 1),
            Err(LoadError::OutOfBounds { x: 0, y: 1, width: 2, height: 1 })
        ));
    }

    #[test]
    fn decode_reports_missing_file() {
        let backend = SoftwareBackend::headless();
        let err = backend.decode_image_file(Path::new("/nonexistent/keysprite/missing.png")).unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn display_can_be_set_after_construction() {
        let mut backend = SoftwareBackend::headless();
        assert!(backend.display().is_none());

        backend.set_display(Some(DisplayMode::new(4, 4, PixelFormat::Xrgb8888)));
        let surface = backend
            .convert_to_display_format(Surface::new(1, 1, PixelFormat::Argb8888), false)
            .unwrap();

        assert_eq!(surface.format(), PixelFormat::Xrgb8888);
    }

    #[test]
    fn display_surface_matches_mode() {
        let surface = rgb565_backend().display_surface().unwrap();

        assert_eq!((surface.width(), surface.height()), (320, 240));
        assert_eq!(surface.format(), PixelFormat::Rgb565);
    }
}
