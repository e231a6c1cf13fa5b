//! Colors and packed pixel formats.

/// Straight (non premultiplied) 8-bit RGBA color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Source-over composition of `self` onto `dst`.
    pub fn over(self, dst: Color) -> Color {
        let sa = self.a as u32;
        let inv = 255 - sa;
        let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * inv + 127) / 255) as u8;

        Color {
            r: mix(self.r, dst.r),
            g: mix(self.g, dst.g),
            b: mix(self.b, dst.b),
            a: (sa + (dst.a as u32 * inv + 127) / 255) as u8,
        }
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Color::rgba(r, g, b, a)
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Layout of a pixel packed into a `u32`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// `0x00RRGGBB`, the top byte is ignored.
    Xrgb8888,
    /// `0xAARRGGBB`.
    Argb8888,
    /// `RRRRRGGGGGGBBBBB` in the low 16 bits.
    Rgb565,
}

impl PixelFormat {
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Argb8888)
    }

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Xrgb8888 | PixelFormat::Argb8888 => 4,
            PixelFormat::Rgb565 => 2,
        }
    }

    /// Same channel layout with the alpha channel dropped.
    pub fn without_alpha(self) -> PixelFormat {
        match self {
            PixelFormat::Argb8888 => PixelFormat::Xrgb8888,
            other => other,
        }
    }

    pub fn map(self, c: Color) -> u32 {
        match self {
            PixelFormat::Xrgb8888 => (c.r as u32) << 16 | (c.g as u32) << 8 | c.b as u32,
            PixelFormat::Argb8888 => {
                (c.a as u32) << 24 | (c.r as u32) << 16 | (c.g as u32) << 8 | c.b as u32
            }
            PixelFormat::Rgb565 => {
                (c.r as u32 >> 3) << 11 | (c.g as u32 >> 2) << 5 | c.b as u32 >> 3
            }
        }
    }

    pub fn color(self, pixel: u32) -> Color {
        match self {
            PixelFormat::Xrgb8888 => Color::rgb((pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8),
            PixelFormat::Argb8888 => Color::rgba(
                (pixel >> 16) as u8,
                (pixel >> 8) as u8,
                pixel as u8,
                (pixel >> 24) as u8,
            ),
            PixelFormat::Rgb565 => {
                let r = ((pixel >> 11) & 0x1F) as u8;
                let g = ((pixel >> 5) & 0x3F) as u8;
                let b = (pixel & 0x1F) as u8;
                // replicate high bits so 0x1F expands to 0xFF
                Color::rgb(r << 3 | r >> 2, g << 2 | g >> 4, b << 3 | b >> 2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_formats_report_full_alpha() {
        let c = Color::rgba(10, 20, 30, 40);

        assert_eq!(PixelFormat::Xrgb8888.color(PixelFormat::Xrgb8888.map(c)), Color::rgb(10, 20, 30));
        assert_eq!(PixelFormat::Argb8888.color(PixelFormat::Argb8888.map(c)), c);
    }

    #[test]
    fn rgb565_keeps_extremes() {
        let f = PixelFormat::Rgb565;

        assert_eq!(f.map(Color::MAGENTA), 0xF81F);
        assert_eq!(f.color(0xF81F), Color::MAGENTA);
        assert_eq!(f.color(f.map(Color::WHITE)), Color::WHITE);
        assert_eq!(f.color(f.map(Color::BLACK)), Color::BLACK);
    }

    #[test]
    fn rgb565_remap_is_stable() {
        // a color read back from a 565 surface must map to the same raw value again
        let f = PixelFormat::Rgb565;
        let read_back = f.color(f.map(Color::rgb(123, 45, 67)));

        assert_eq!(f.map(read_back), f.map(Color::rgb(123, 45, 67)));
    }

    #[test]
    fn over_respects_coverage() {
        let dst = Color::rgb(0, 0, 255);

        assert_eq!(Color::rgba(255, 0, 0, 255).over(dst), Color::rgb(255, 0, 0));
        assert_eq!(Color::rgba(255, 0, 0, 0).over(dst), dst);
        assert_eq!(Color::rgba(255, 0, 0, 128).over(dst), Color::rgba(128, 0, 127, 255));
    }

    #[test]
    fn without_alpha() {
        assert_eq!(PixelFormat::Argb8888.without_alpha(), PixelFormat::Xrgb8888);
        assert_eq!(PixelFormat::Rgb565.without_alpha(), PixelFormat::Rgb565);
        assert!(!PixelFormat::Xrgb8888.has_alpha());
        assert_eq!(PixelFormat::Rgb565.bytes_per_pixel(), 2);
        assert_eq!(PixelFormat::Argb8888.bytes_per_pixel(), 4);
    }
}
