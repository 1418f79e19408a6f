//! Storage module for persistent data storage
//!
//! Provides SQLite-based persistence for command guides.

mod database;

pub use database::CommandDb;
