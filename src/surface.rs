//! Software pixel surface.
//!
//! Pixels are stored one `u32` per pixel, packed in the surface's
//! [`PixelFormat`]. A surface may carry a colorkey: pixels whose packed value
//! equals the key are skipped by [`Surface::blit`]. With RLE enabled the
//! surface keeps, per row, the runs of non-key pixels so blits can jump over
//! transparent stretches.

use crate::math::{self, Rect};
use crate::pixels::{Color, PixelFormat};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    data: Vec<u32>,
    extent: math::Vec2<usize>,
    format: PixelFormat,
    colorkey: Option<u32>,
    rle: Option<Vec<Vec<Run>>>,
}

/// Horizontal stretch of visible pixels inside one row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Run {
    start: usize,
    len: usize,
}

impl Surface {
    /// Creates a surface filled with transparent black.
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Surface {
        Surface {
            data: vec![format.map(Color::TRANSPARENT); width * height],
            extent: math::Vec2::<usize>::new(width, height),
            format,
            colorkey: None,
            rle: None,
        }
    }

    /// Builds a surface from tightly packed RGBA bytes.
    ///
    /// Returns `None` when `rgba` does not hold exactly `width * height` pixels.
    pub fn from_rgba8(width: usize, height: usize, rgba: &[u8], format: PixelFormat) -> Option<Surface> {
        if rgba.len() != width * height * 4 {
            return None;
        }

        let data = rgba
            .chunks_exact(4)
            .map(|px| format.map(Color::rgba(px[0], px[1], px[2], px[3])))
            .collect();

        Some(Surface {
            data,
            extent: math::Vec2::<usize>::new(width, height),
            format,
            colorkey: None,
            rle: None,
        })
    }

    pub fn width(&self) -> usize {
        self.extent.x
    }

    pub fn height(&self) -> usize {
        self.extent.y
    }

    pub fn extent(&self) -> math::Vec2<usize> {
        self.extent
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// `true` when pixels carry their own alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.format.has_alpha()
    }

    /// Packed pixels, row major.
    pub fn pixels(&self) -> &[u32] {
        &self.data
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.extent.x && y < self.extent.y).then(|| y * self.extent.x + x)
    }

    pub fn get_at(&self, x: usize, y: usize) -> Option<Color> {
        self.index(x, y).map(|i| self.format.color(self.data[i]))
    }

    /// Writes one pixel; returns `false` when the coordinate is outside.
    pub fn set_at(&mut self, x: usize, y: usize, color: Color) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        self.data[i] = self.format.map(color);
        self.refresh_rle();
        true
    }

    pub fn fill(&mut self, color: Color) {
        let pixel = self.format.map(color);
        self.data.iter_mut().for_each(|p| *p = pixel);
        self.refresh_rle();
    }

    pub fn colorkey(&self) -> Option<Color> {
        self.colorkey.map(|key| self.format.color(key))
    }

    /// Sets or clears the transparent color. `rle` requests run-length
    /// encoded blits; it has no effect without a key.
    pub fn set_colorkey(&mut self, key: Option<Color>, rle: bool) {
        self.colorkey = key.map(|c| self.format.map(c));
        self.rle = if rle && self.colorkey.is_some() {
            Some(Vec::new())
        } else {
            None
        };
        self.refresh_rle();
    }

    pub fn is_rle(&self) -> bool {
        self.rle.is_some()
    }

    fn refresh_rle(&mut self) {
        let (Some(runs), Some(key)) = (self.rle.as_mut(), self.colorkey) else {
            return;
        };

        runs.clear();
        for row in self.data.chunks_exact(self.extent.x.max(1)).take(self.extent.y) {
            let mut row_runs = Vec::new();
            let mut start = None;

            for (x, &pixel) in row.iter().enumerate() {
                match (start, pixel == key) {
                    (None, false) => start = Some(x),
                    (Some(s), true) => {
                        row_runs.push(Run { start: s, len: x - s });
                        start = None;
                    }
                    _ => {}
                }
            }
            if let Some(s) = start {
                row_runs.push(Run { start: s, len: row.len() - s });
            }

            runs.push(row_runs);
        }
    }

    /// Returns a copy of this surface in another pixel format.
    ///
    /// The colorkey and RLE request carry over, remapped to the new format.
    pub fn convert(&self, format: PixelFormat) -> Surface {
        let data = self
            .data
            .iter()
            .map(|&p| format.map(self.format.color(p)))
            .collect();

        let mut converted = Surface {
            data,
            extent: self.extent,
            format,
            colorkey: None,
            rle: None,
        };
        converted.set_colorkey(self.colorkey(), self.is_rle());
        converted
    }

    /// Copies this surface onto `dst` with its top-left corner at `(x, y)`.
    ///
    /// Keyed pixels are skipped, alpha pixels are composited source-over and
    /// everything else is copied as is. The destination clips.
    pub fn blit(&self, dst: &mut Surface, x: i64, y: i64) {
        let placed = Rect::new(x, y, self.extent.x as i64, self.extent.y as i64);
        let Some(clip) = placed.intersection(&Rect::from_extent(dst.extent)) else {
            return;
        };

        let src_x0 = (clip.x - x) as usize;
        let src_x1 = src_x0 + clip.width as usize;

        for row in 0..clip.height as usize {
            let sy = (clip.y - y) as usize + row;
            let dy = clip.y as usize + row;

            match &self.rle {
                Some(runs) => {
                    for run in &runs[sy] {
                        let from = run.start.max(src_x0);
                        let to = (run.start + run.len).min(src_x1);
                        if from < to {
                            self.blit_span(dst, sy, from, to, (clip.x - x) as usize, dy, clip.x as usize);
                        }
                    }
                }
                None => self.blit_span(dst, sy, src_x0, src_x1, src_x0, dy, clip.x as usize),
            }
        }

        dst.refresh_rle();
    }

    /// Blits source pixels `from..to` of row `sy`. `origin` is the source
    /// column that lands on destination column `dst_x`.
    #[allow(clippy::too_many_arguments)]
    fn blit_span(&self, dst: &mut Surface, sy: usize, from: usize, to: usize, origin: usize, dy: usize, dst_x: usize) {
        let src_row = sy * self.extent.x;
        let dst_row = dy * dst.extent.x;

        for sx in from..to {
            let pixel = self.data[src_row + sx];
            if self.colorkey == Some(pixel) {
                continue;
            }

            let di = dst_row + dst_x + (sx - origin);
            let color = self.format.color(pixel);
            let out = if self.format.has_alpha() {
                color.over(dst.format.color(dst.data[di]))
            } else {
                color
            };
            dst.data[di] = dst.format.map(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite() -> Surface {
        // 4x2, magenta background with a green bar in the middle of row 0
        let mut s = Surface::new(4, 2, PixelFormat::Xrgb8888);
        s.fill(Color::MAGENTA);
        s.set_at(1, 0, Color::rgb(0, 255, 0));
        s.set_at(2, 0, Color::rgb(0, 255, 0));
        s
    }

    #[test]
    fn new_surface_is_zeroed() {
        let s = Surface::new(3, 2, PixelFormat::Argb8888);

        assert_eq!(s.pixels(), &[0; 6]);
        assert_eq!(s.get_at(2, 1), Some(Color::TRANSPARENT));
        assert_eq!(s.get_at(3, 0), None);
    }

    #[test]
    fn from_rgba8_checks_length() {
        assert!(Surface::from_rgba8(2, 2, &[0; 15], PixelFormat::Argb8888).is_none());

        let s = Surface::from_rgba8(1, 1, &[1, 2, 3, 4], PixelFormat::Argb8888).unwrap();
        assert_eq!(s.get_at(0, 0), Some(Color::rgba(1, 2, 3, 4)));
    }

    #[test]
    fn keyed_blit_skips_key() {
        let mut s = sprite();
        s.set_colorkey(Some(Color::MAGENTA), false);

        let mut screen = Surface::new(6, 3, PixelFormat::Xrgb8888);
        screen.fill(Color::WHITE);
        s.blit(&mut screen, 1, 1);

        assert_eq!(screen.get_at(1, 1), Some(Color::WHITE));
        assert_eq!(screen.get_at(2, 1), Some(Color::rgb(0, 255, 0)));
        assert_eq!(screen.get_at(3, 1), Some(Color::rgb(0, 255, 0)));
        assert_eq!(screen.get_at(4, 1), Some(Color::WHITE));
        assert_eq!(screen.get_at(2, 2), Some(Color::WHITE));
    }

    #[test]
    fn rle_blit_matches_plain_blit() {
        let mut plain = sprite();
        plain.set_colorkey(Some(Color::MAGENTA), false);
        let mut rle = sprite();
        rle.set_colorkey(Some(Color::MAGENTA), true);
        assert!(rle.is_rle());
        assert!(!plain.is_rle());

        for (x, y) in [(0, 0), (-2, 0), (3, 2), (-1, -1)] {
            let mut a = Surface::new(5, 3, PixelFormat::Xrgb8888);
            let mut b = a.clone();
            plain.blit(&mut a, x, y);
            rle.blit(&mut b, x, y);
            assert_eq!(a.pixels(), b.pixels(), "offset ({x}, {y})");
        }
    }

    #[test]
    fn rle_runs_follow_pixel_edits() {
        let mut s = sprite();
        s.set_colorkey(Some(Color::MAGENTA), true);
        s.set_at(3, 1, Color::BLACK);

        let mut screen = Surface::new(4, 2, PixelFormat::Xrgb8888);
        screen.fill(Color::WHITE);
        s.blit(&mut screen, 0, 0);

        assert_eq!(screen.get_at(3, 1), Some(Color::BLACK));
        assert_eq!(screen.get_at(0, 1), Some(Color::WHITE));
    }

    #[test]
    fn alpha_blit_blends() {
        let mut src = Surface::new(1, 1, PixelFormat::Argb8888);
        src.set_at(0, 0, Color::rgba(255, 0, 0, 128));
        let mut dst = Surface::new(1, 1, PixelFormat::Xrgb8888);
        dst.fill(Color::rgb(0, 0, 255));

        src.blit(&mut dst, 0, 0);

        assert_eq!(dst.get_at(0, 0), Some(Color::rgb(128, 0, 127)));
    }

    #[test]
    fn blit_outside_is_noop() {
        let s = sprite();
        let mut screen = Surface::new(2, 2, PixelFormat::Xrgb8888);
        let before = screen.clone();

        s.blit(&mut screen, 5, 5);
        s.blit(&mut screen, -4, 0);

        assert_eq!(screen, before);
    }

    #[test]
    fn convert_remaps_key() {
        let mut s = sprite();
        s.set_colorkey(Some(Color::MAGENTA), true);

        let c = s.convert(PixelFormat::Rgb565);

        assert_eq!(c.format(), PixelFormat::Rgb565);
        assert_eq!(c.colorkey(), Some(Color::MAGENTA));
        assert!(c.is_rle());
        assert_eq!(c.pixels()[0], 0xF81F);
    }

    #[test]
    fn clearing_key_drops_rle() {
        let mut s = sprite();
        s.set_colorkey(Some(Color::MAGENTA), true);
        s.set_colorkey(None, true);

        assert_eq!(s.colorkey(), None);
        assert!(!s.is_rle());
    }
}
