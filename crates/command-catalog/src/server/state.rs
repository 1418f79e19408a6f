//! Application state for the catalog server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::catalog::CatalogListing;
use crate::config::{CatalogConfig, StorageBackend};
use crate::error::Result;
use crate::ingestion::{seed_from_dir, IngestPipeline};
use crate::providers::{CommandStore, InMemoryCommandStore, SqliteCommandStore};
use crate::render::{HtmlRenderer, Renderer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: CatalogConfig,
    /// Document store (SQLite or in-memory)
    store: Arc<dyn CommandStore>,
    /// Ingestion pipeline, with the listing registered as listener
    pipeline: Arc<IngestPipeline>,
    /// Cached listing
    listing: Arc<CatalogListing>,
    /// Markdown renderer for command detail
    renderer: Arc<dyn Renderer>,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state, opening the configured store and
    /// seeding it if a seed directory is set
    pub async fn new(config: CatalogConfig) -> Result<Self> {
        tracing::info!(
            "Initializing catalog state (storage: {:?})...",
            config.storage.backend
        );

        let store: Arc<dyn CommandStore> = match config.storage.backend {
            StorageBackend::Sqlite => {
                let store = SqliteCommandStore::open(&config.storage.database_path)?;
                tracing::info!(
                    "SQLite store opened at {}",
                    config.storage.database_path.display()
                );
                Arc::new(store)
            }
            StorageBackend::Memory => {
                tracing::info!("Using in-memory store");
                Arc::new(InMemoryCommandStore::new())
            }
        };

        let state = Self::with_store(config, store);

        if let Some(dir) = state.config().ingest.seed_dir.clone() {
            seed_from_dir(state.pipeline(), &dir).await?;
        }

        state.set_ready(true);
        tracing::info!("Catalog state initialized");

        Ok(state)
    }

    /// Build state around an existing store; not ready until marked so
    pub fn with_store(config: CatalogConfig, store: Arc<dyn CommandStore>) -> Self {
        let listing = Arc::new(CatalogListing::new(Arc::clone(&store)));
        let pipeline = IngestPipeline::new(Arc::clone(&store), config.category_policy())
            .with_extensions(&config.ingest.accepted_extensions)
            .with_listener(listing.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                pipeline: Arc::new(pipeline),
                listing,
                renderer: Arc::new(HtmlRenderer),
                ready: RwLock::new(false),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// Get document store
    pub fn store(&self) -> &Arc<dyn CommandStore> {
        &self.inner.store
    }

    /// Get ingestion pipeline
    pub fn pipeline(&self) -> &Arc<IngestPipeline> {
        &self.inner.pipeline
    }

    /// Get cached listing
    pub fn listing(&self) -> &Arc<CatalogListing> {
        &self.inner.listing
    }

    /// Get renderer
    pub fn renderer(&self) -> &Arc<dyn Renderer> {
        &self.inner.renderer
    }

    /// Check if ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
