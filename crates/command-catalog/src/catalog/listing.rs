//! Cached command listing with invalidation on ingestion
//!
//! The listing keeps the last `query_all` snapshot and serves searches from
//! it. An accepted ingestion drops the snapshot; the next read re-fetches.

use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::ingestion::{CategoryPolicy, IngestListener};
use crate::providers::{CommandStore, StoreError};
use crate::types::{query::ALL_CATEGORIES, CommandRecord, ListQuery, ParsedCommand};

use super::filter::filter_commands;

/// Listing of stored commands, newest first
pub struct CatalogListing {
    store: Arc<dyn CommandStore>,
    snapshot: RwLock<Option<Arc<Vec<CommandRecord>>>>,
    generation: AtomicU64,
}

impl CatalogListing {
    /// Create a listing over a store
    pub fn new(store: Arc<dyn CommandStore>) -> Self {
        Self {
            store,
            snapshot: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Current snapshot, fetched from the store if none is cached
    pub async fn snapshot(&self) -> Result<Arc<Vec<CommandRecord>>, StoreError> {
        let cached = self.snapshot.read().clone();
        if let Some(cached) = cached {
            return Ok(cached);
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let records = Arc::new(self.store.query_all().await?);
        tracing::debug!("Listing refreshed from '{}': {} commands", self.store.name(), records.len());

        // An ingestion that landed while we were fetching makes this copy stale
        let mut slot = self.snapshot.write();
        if self.generation.load(Ordering::SeqCst) == generation {
            *slot = Some(records.clone());
        }

        Ok(records)
    }

    /// Drop the cached snapshot
    pub fn invalidate(&self) {
        let mut slot = self.snapshot.write();
        self.generation.fetch_add(1, Ordering::SeqCst);
        *slot = None;
    }

    /// Whether a snapshot is currently cached
    pub fn is_cached(&self) -> bool {
        self.snapshot.read().is_some()
    }

    /// Commands matching a query, newest first
    pub async fn search(&self, query: &ListQuery) -> Result<Vec<CommandRecord>, StoreError> {
        let snapshot = self.snapshot().await?;
        Ok(filter_commands(&snapshot, query).into_iter().cloned().collect())
    }

    /// Categories offered for filtering: "All", then every category named by
    /// the policy or used by a stored command, sorted
    pub async fn categories(&self, policy: &CategoryPolicy) -> Result<Vec<String>, StoreError> {
        let snapshot = self.snapshot().await?;

        let known: BTreeSet<String> = policy
            .allowed()
            .into_iter()
            .chain(snapshot.iter().map(|r| r.command.category.clone()))
            .collect();

        Ok(std::iter::once(ALL_CATEGORIES.to_string())
            .chain(known)
            .collect())
    }
}

impl IngestListener for CatalogListing {
    fn on_accepted(&self, command: &ParsedCommand) {
        tracing::debug!("Invalidating listing after '{}' was accepted", command.id);
        self.invalidate();
    }
}
