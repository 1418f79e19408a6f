//! Provider abstractions for command storage
//!
//! This module provides a trait-based abstraction that allows switching
//! between an in-memory store and SQLite persistence.

pub mod document_store;
pub mod memory;
pub mod sqlite;

pub use document_store::{CommandStore, StoreError};
pub use memory::InMemoryCommandStore;
pub use sqlite::SqliteCommandStore;
