//! TOML configuration.
//!
//! ```toml
//! [assets]
//! root = "media"        # relative to the config file
//!
//! [viewer]
//! title = "keysprite"
//! width = 800
//! height = 600
//! sprite = "brick.bmp"
//! background = "backdrop.png"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::assets::AssetRoot;
use crate::error::ConfigError;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoaderConfig {
    pub assets: AssetsConfig,
    pub viewer: ViewerConfig,

    /// Directory relative asset roots are anchored to.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    /// Asset root. Unset means the crate's bundled `media` directory.
    pub root: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub sprite: String,
    pub background: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "keysprite".to_string(),
            width: 800,
            height: 600,
            sprite: "brick.bmp".to_string(),
            background: None,
        }
    }
}

impl LoaderConfig {
    /// Parses a config. Relative asset roots are anchored at `base_dir`.
    pub fn from_toml_str(text: &str, base_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut config: LoaderConfig = toml::from_str(text)?;
        config.base_dir = Some(base_dir.into());
        Ok(config)
    }

    /// Reads a config file; relative paths inside it are anchored at the
    /// file's own directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let base_dir = std::fs::canonicalize(&base_dir).unwrap_or(base_dir);

        Self::from_toml_str(&text, base_dir)
    }

    pub fn asset_root(&self) -> AssetRoot {
        match (&self.assets.root, &self.base_dir) {
            (None, _) => AssetRoot::bundled(),
            (Some(root), Some(base)) => AssetRoot::new(base.join(root)),
            (Some(root), None) => AssetRoot::new(root),
        }
    }
}
