//! Error types for loading images and reading configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while resolving, decoding or converting an image.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The resolved path is missing or unreadable.
    #[error("could not read {}: {source}", path.display())]
    Io {
        /// Resolved asset path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file exists but is not an image the decoder understands.
    #[error("could not decode {}: {source}", path.display())]
    Decode {
        /// Resolved asset path.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Format conversion was requested without an active display mode.
    #[error("video backend has no display mode; set one before converting surfaces")]
    BackendNotInitialized,

    /// Pixel access outside the surface.
    #[error("pixel ({x}, {y}) is outside a {width}x{height} surface")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Error reported verbatim by a graphics library.
    #[error("graphics backend error: {0}")]
    Backend(String),
}

impl LoadError {
    /// `true` when the asset file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Errors produced while reading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
