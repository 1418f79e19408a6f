//! SQLite provider implementation
//!
//! Wraps the synchronous [`CommandDb`] and runs each call on the blocking
//! pool. A started insert runs to completion even if the awaiting future is
//! dropped.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::storage::CommandDb;
use crate::types::{CommandRecord, ParsedCommand};

use super::document_store::{CommandStore, StoreError};

/// Command store backed by a SQLite file
pub struct SqliteCommandStore {
    db: CommandDb,
}

impl SqliteCommandStore {
    /// Create from an existing database handle
    pub fn new(db: CommandDb) -> Self {
        Self { db }
    }

    /// Open (or create) the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(CommandDb::new(path)?))
    }

    async fn blocking<T, F>(&self, f: F) -> std::result::Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(CommandDb) -> std::result::Result<T, StoreError> + Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(db))
            .await
            .map_err(|e| StoreError::backend(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl CommandStore for SqliteCommandStore {
    async fn insert(&self, command: &ParsedCommand) -> std::result::Result<CommandRecord, StoreError> {
        let command = command.clone();
        self.blocking(move |db| db.insert_command(&command)).await
    }

    async fn query_all(&self) -> std::result::Result<Vec<CommandRecord>, StoreError> {
        self.blocking(|db| db.list_commands()).await
    }

    async fn get(&self, id: &str) -> std::result::Result<Option<CommandRecord>, StoreError> {
        let id = id.to_string();
        self.blocking(move |db| db.get_command(&id)).await
    }

    async fn health_check(&self) -> std::result::Result<bool, StoreError> {
        self.blocking(|db| db.count().map(|_| true)).await
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(id: &str) -> ParsedCommand {
        ParsedCommand {
            id: id.to_string(),
            title: "Title".to_string(),
            description: "Description".to_string(),
            category: "Database".to_string(),
            tags: vec!["sql".to_string()],
            content: "SELECT 1;".to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_round_trip() {
        let store = SqliteCommandStore::new(CommandDb::in_memory().unwrap());

        let record = store.insert(&command("select-one")).await.unwrap();
        assert_eq!(record.command.id, "select-one");

        let all = store.query_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].command, command("select-one"));

        assert!(store.get("select-one").await.unwrap().is_some());
        assert!(store.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_store_duplicate() {
        let store = SqliteCommandStore::new(CommandDb::in_memory().unwrap());

        store.insert(&command("select-one")).await.unwrap();
        let err = store.insert(&command("select-one")).await.unwrap_err();
        assert_eq!(err, StoreError::Duplicate("select-one".to_string()));
    }
}
