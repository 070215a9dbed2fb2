use std::path::PathBuf;

use tracing::info;

use crate::gui_pipeline::catalog::types::{DEFAULT_ITEM_BASE_URL, ItemCatalog};
use crate::gui_pipeline::common::error::{Result, SlotError};
use crate::gui_pipeline::common::http;

pub trait CatalogSource {
    fn load(&self) -> Result<ItemCatalog>;
}

/// Reads a `_list.json` from disk; item URLs point at `base_url`.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
    base_url: String,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            base_url: base_url.into(),
        }
    }
}

impl CatalogSource for FileCatalogSource {
    fn load(&self) -> Result<ItemCatalog> {
        let json = std::fs::read(&self.path).map_err(|e| {
            SlotError::CatalogError(format!("{}: {}", self.path.display(), e))
        })?;
        let catalog = ItemCatalog::parse(&json, &self.base_url)?;
        info!(items = catalog.len(), path = %self.path.display(), "Loaded item catalog");
        Ok(catalog)
    }
}

/// Fetches `<base_url>/_list.json`.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    base_url: String,
}

impl Default for HttpCatalogSource {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_BASE_URL)
    }
}

impl HttpCatalogSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn list_url(&self) -> String {
        format!("{}/_list.json", self.base_url)
    }
}

impl CatalogSource for HttpCatalogSource {
    fn load(&self) -> Result<ItemCatalog> {
        let url = self.list_url();
        let json = http::fetch_bytes(&url).map_err(SlotError::CatalogError)?;
        let catalog = ItemCatalog::parse(&json, &self.base_url)?;
        info!(items = catalog.len(), %url, "Fetched item catalog");
        Ok(catalog)
    }
}
