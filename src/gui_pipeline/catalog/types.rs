//! Item catalog types

use serde::{Deserialize, Serialize};

use crate::gui_pipeline::common::error::{Result, SlotError};

/// Item texture directory of the 1.21.4 minecraft-assets mirror.
pub const DEFAULT_ITEM_BASE_URL: &str =
    "https://raw.githubusercontent.com/InventivetalentDev/minecraft-assets/1.21.4/assets/minecraft/textures/item";

/// Raw `_list.json` listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemList {
    #[serde(default)]
    pub directories: Vec<String>,
    pub files: Vec<String>,
}

/// One selectable item texture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Display name, e.g. "golden apple"
    pub name: String,
    /// File name inside the listing, e.g. "golden_apple.png"
    pub path: String,
    pub url: String,
}

impl CatalogItem {
    pub fn from_path(path: &str, base_url: &str) -> Self {
        let stem = path.strip_suffix(".png").unwrap_or(path);
        Self {
            name: stem.replace('_', " "),
            path: path.to_string(),
            url: format!("{}/{}", base_url.trim_end_matches('/'), path),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCatalog {
    items: Vec<CatalogItem>,
}

impl ItemCatalog {
    pub fn from_list(list: &ItemList, base_url: &str) -> Self {
        Self {
            items: list
                .files
                .iter()
                .map(|path| CatalogItem::from_path(path, base_url))
                .collect(),
        }
    }

    /// Parses a `_list.json` body.
    pub fn parse(json: &[u8], base_url: &str) -> Result<Self> {
        let list: ItemList = serde_json::from_slice(json)
            .map_err(|e| SlotError::CatalogError(format!("invalid item listing: {}", e)))?;
        Ok(Self::from_list(&list, base_url))
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive substring search on item names. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&CatalogItem> {
        let query = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| query.is_empty() || item.name.to_lowercase().contains(&query))
            .collect()
    }
}
