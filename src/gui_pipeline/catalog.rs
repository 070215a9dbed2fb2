//! Item catalog module
//!
//! This module turns the Minecraft asset item listing into searchable
//! catalog entries and keeps the loaded catalog in an explicit cache.

mod cache;
mod source;
pub mod types;

pub use cache::{CatalogCache, global_cache};
pub use source::{CatalogSource, FileCatalogSource, HttpCatalogSource};
pub use types::{CatalogItem, ItemCatalog, ItemList, DEFAULT_ITEM_BASE_URL};
