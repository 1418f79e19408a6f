//! In-memory command store
//!
//! Keeps records in insertion order behind a single lock, so the uniqueness
//! check and the insert happen atomically.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::types::{CommandRecord, ParsedCommand};

use super::document_store::{CommandStore, StoreError};

/// Process-local command store
#[derive(Default)]
pub struct InMemoryCommandStore {
    records: RwLock<Vec<CommandRecord>>,
    insert_calls: AtomicUsize,
}

impl InMemoryCommandStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Number of insert calls received, successful or not
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandStore for InMemoryCommandStore {
    async fn insert(&self, command: &ParsedCommand) -> Result<CommandRecord, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        let mut records = self.records.write();
        if records.iter().any(|r| r.command.id == command.id) {
            return Err(StoreError::Duplicate(command.id.clone()));
        }

        let record = CommandRecord::new(command.clone());
        records.push(record.clone());
        Ok(record)
    }

    async fn query_all(&self) -> Result<Vec<CommandRecord>, StoreError> {
        // Insertion order is creation order
        Ok(self.records.read().iter().rev().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<CommandRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|r| r.command.id == id)
            .cloned())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
