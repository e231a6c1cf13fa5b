//! Loads sprite images from a media directory and prepares them for blitting,
//! either keying out the top-left pixel's color or keeping per-pixel alpha.

pub mod assets;
pub mod config;
pub mod error;
pub mod math;
pub mod pixels;
pub mod render;
pub mod surface;
pub mod window;

pub use assets::{AssetLoader, AssetRoot, MEDIA_DIR};
pub use config::LoaderConfig;
pub use error::{ConfigError, LoadError};
pub use pixels::{Color, PixelFormat};
pub use render::{Backend, SoftwareBackend};
#[cfg(feature = "sdl")]
pub use render::SdlBackend;
pub use surface::Surface;
pub use window::DisplayMode;
