use crate::math;
use crate::pixels::PixelFormat;

/// Active video mode: the size and native pixel format of the display
/// surface that loaded images get converted for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DisplayMode {
    pub extent: math::Vec2<usize>,
    pub format: PixelFormat,
}

impl DisplayMode {
    pub fn new(width: usize, height: usize, format: PixelFormat) -> DisplayMode {
        DisplayMode {
            extent: math::Vec2::<usize>::new(width, height),
            format,
        }
    }
}
