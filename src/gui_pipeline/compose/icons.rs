//! Item icon sources
//!
//! The compositor only needs decoded pixels for an icon reference; where
//! the bytes live (a texture pack on disk, a remote asset mirror) is up to
//! the source.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::gui_pipeline::common::error::{Result, SlotError};
use crate::gui_pipeline::common::http;
use crate::gui_pipeline::pixels::{ImageCrateReader, PixelBuffer, PixelReader};

pub trait IconSource {
    fn load_icon(&self, source: &str) -> Result<PixelBuffer>;
}

/// Reads icons from files below `root`.
#[derive(Debug, Clone)]
pub struct FsIconSource {
    root: PathBuf,
}

impl FsIconSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl IconSource for FsIconSource {
    fn load_icon(&self, source: &str) -> Result<PixelBuffer> {
        let path = self.root.join(source);
        debug!("Loading icon {}", path.display());

        let bytes = std::fs::read(&path)
            .map_err(|e| SlotError::ImageLoadError(format!("{}: {}", path.display(), e)))?;
        ImageCrateReader.read_pixels(&bytes)
    }
}

/// Fetches icons over HTTP. Relative references are resolved against `base_url`.
#[derive(Debug, Clone, Default)]
pub struct HttpIconSource {
    base_url: Option<String>,
}

impl HttpIconSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
        }
    }

    pub fn resolve(&self, source: &str) -> Result<String> {
        if http::is_remote(source) {
            return Ok(source.to_string());
        }

        match &self.base_url {
            Some(base) => Ok(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                source.trim_start_matches('/')
            )),
            None => Err(SlotError::ImageLoadError(format!(
                "{}: not a URL and no base URL configured",
                source
            ))),
        }
    }
}

impl IconSource for HttpIconSource {
    fn load_icon(&self, source: &str) -> Result<PixelBuffer> {
        let url = self.resolve(source)?;
        let bytes = http::fetch_bytes(&url).map_err(SlotError::ImageLoadError)?;
        ImageCrateReader.read_pixels(&bytes)
    }
}
