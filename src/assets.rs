//! Asset path resolution and image loading.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LoadError;
use crate::render::Backend;

/// Name of the media directory placed next to the code directory.
pub const MEDIA_DIR: &str = "media";

/// Directory all asset names are resolved against.
///
/// Built once at startup; resolution never consults the working directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRoot {
    path: PathBuf,
}

impl AssetRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `media` directory that is a sibling of `code_dir`.
    pub fn beside(code_dir: &Path) -> Self {
        let parent = code_dir.parent().unwrap_or(code_dir);
        Self::new(parent.join(MEDIA_DIR))
    }

    /// The `media` directory shipped at the root of this crate.
    pub fn bundled() -> Self {
        Self::beside(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"))
    }

    /// `media` directory next to the directory holding the running executable.
    pub fn beside_executable() -> std::io::Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or(exe.as_path());
        Ok(Self::beside(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Joins `name` onto the root. `name` is not validated; an absolute name
    /// replaces the root entirely.
    pub fn resolve(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }
}

impl Default for AssetRoot {
    fn default() -> Self {
        Self::bundled()
    }
}

/// Loads images from an [`AssetRoot`] through a graphics [`Backend`].
///
/// Every call decodes the file again and returns a fresh surface; nothing is
/// cached.
///
/// ```no_run
/// use keysprite::{AssetLoader, AssetRoot, DisplayMode, PixelFormat, SoftwareBackend};
///
/// let backend = SoftwareBackend::new(DisplayMode::new(800, 600, PixelFormat::Xrgb8888));
/// let loader = AssetLoader::new(AssetRoot::bundled(), backend);
/// let brick = loader.load("brick.bmp")?;
/// assert!(brick.colorkey().is_some());
/// # Ok::<(), keysprite::LoadError>(())
/// ```
#[derive(Clone, Debug)]
pub struct AssetLoader<B> {
    root: AssetRoot,
    backend: B,
}

impl<B: Backend> AssetLoader<B> {
    pub fn new(root: AssetRoot, backend: B) -> Self {
        Self { root, backend }
    }

    pub fn root(&self) -> &AssetRoot {
        &self.root
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn resolve(&self, name: impl AsRef<Path>) -> PathBuf {
        self.root.resolve(name)
    }

    /// Loads `name` with the top-left pixel keyed out.
    pub fn load(&self, name: impl AsRef<Path>) -> Result<B::Surface, LoadError> {
        self.load_image(name, true)
    }

    /// Loads `name` and prepares it for blitting to the backend's display.
    ///
    /// With `transparent` the image is converted without alpha and the color
    /// of pixel (0, 0) becomes its RLE-accelerated colorkey. Otherwise the
    /// image is converted keeping per-pixel alpha. Backend errors are returned
    /// as they are.
    pub fn load_image(&self, name: impl AsRef<Path>, transparent: bool) -> Result<B::Surface, LoadError> {
        let path = self.resolve(name);
        debug!(path = %path.display(), transparent, "loading image");

        let surface = self.backend.decode_image_file(&path)?;

        if transparent {
            let mut surface = self.backend.convert_to_display_format(surface, false)?;
            let key = self.backend.get_pixel(&surface, 0, 0)?;
            self.backend.set_color_key(&mut surface, key, true)?;
            debug!(?key, "keyed top-left color");
            Ok(surface)
        } else {
            self.backend.convert_to_display_format(surface, true)
        }
    }
}
