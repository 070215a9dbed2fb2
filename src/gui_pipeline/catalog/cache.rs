//! Explicit item catalog cache.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::gui_pipeline::catalog::source::CatalogSource;
use crate::gui_pipeline::catalog::types::ItemCatalog;
use crate::gui_pipeline::common::error::Result;

/// Holds at most one loaded catalog until it is invalidated.
///
/// Failed loads are not cached; the next call tries the source again.
#[derive(Debug, Default)]
pub struct CatalogCache {
    slot: Mutex<Option<Arc<ItemCatalog>>>,
}

lazy_static::lazy_static! {
    static ref GLOBAL_CACHE: CatalogCache = CatalogCache::new();
}

/// Process-wide cache shared by every caller that does not manage its own.
pub fn global_cache() -> &'static CatalogCache {
    &GLOBAL_CACHE
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<ItemCatalog>>> {
        // the slot is only ever replaced whole
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the cached catalog, loading it from `source` on a miss.
    pub fn get_or_load<S>(&self, source: &S) -> Result<Arc<ItemCatalog>>
    where
        S: CatalogSource + ?Sized,
    {
        let mut slot = self.lock();
        if let Some(catalog) = slot.as_ref() {
            debug!("Item catalog cache hit");
            return Ok(Arc::clone(catalog));
        }

        let catalog = Arc::new(source.load()?);
        *slot = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    pub fn cached(&self) -> Option<Arc<ItemCatalog>> {
        self.lock().clone()
    }

    pub fn invalidate(&self) {
        debug!("Invalidating item catalog cache");
        self.lock().take();
    }
}
