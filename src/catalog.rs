//! Shared handle to the active catalog snapshot.
//!
//! Readers take an `Arc` to the current [`CatalogStore`] and query it without
//! holding any lock. A new snapshot is built off to the side and published
//! with [`SharedCatalog::install`], which only swaps the reference; queries
//! already running keep the snapshot they started with.

use std::sync::{Arc, RwLock};

use anyhow::Result;
use origin_ui_core::CatalogStore;

use crate::sources::CatalogSource;

/// Counts reported after a snapshot is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub components: usize,
    pub categories: usize,
    pub tags: usize,
}

pub struct SharedCatalog {
    current: RwLock<Arc<CatalogStore>>,
}

impl SharedCatalog {
    /// A handle pointing at an empty, unloaded store.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(CatalogStore::new())),
        }
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<CatalogStore> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Publish `store` as the active snapshot.
    pub fn install(&self, store: CatalogStore) {
        let store = Arc::new(store);
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = store;
    }

    /// Build a snapshot from `source` and install it.
    ///
    /// On any failure the active snapshot is left untouched.
    pub fn rebuild_from(&self, source: &dyn CatalogSource) -> Result<LoadSummary> {
        let batch = source.scan()?;
        let mut store = CatalogStore::new();
        store.load_with_info(batch.records, batch.info)?;

        let summary = LoadSummary {
            components: store.len(),
            categories: store.categories().len(),
            tags: store.tags().len(),
        };
        self.install(store);

        tracing::info!(
            source = source.name(),
            components = summary.components,
            categories = summary.categories,
            tags = summary.tags,
            "catalog snapshot installed"
        );
        Ok(summary)
    }
}

impl Default for SharedCatalog {
    fn default() -> Self {
        Self::new()
    }
}
