//! Document store provider trait for persisting command guides

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{CommandRecord, ParsedCommand};

/// Failure reported by a document store backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Uniqueness constraint on the command id was violated
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// Any other backend failure (connection, I/O, corruption, ...)
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Trait for command storage
///
/// The store is the final arbiter of id uniqueness: two concurrent inserts
/// of the same id must result in exactly one stored row and one
/// [`StoreError::Duplicate`].
///
/// Implementations:
/// - `InMemoryCommandStore`: process-local, for tests and ephemeral runs
/// - `SqliteCommandStore`: SQLite file via rusqlite
#[async_trait]
pub trait CommandStore: Send + Sync {
    /// Insert a validated command
    ///
    /// Returns the stored record with its store-assigned metadata.
    async fn insert(&self, command: &ParsedCommand) -> Result<CommandRecord, StoreError>;

    /// All records, newest first
    async fn query_all(&self) -> Result<Vec<CommandRecord>, StoreError>;

    /// Look up a record by command id
    async fn get(&self, id: &str) -> Result<Option<CommandRecord>, StoreError>;

    /// Check if the provider is healthy
    async fn health_check(&self) -> Result<bool, StoreError>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
