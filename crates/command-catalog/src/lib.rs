//! command-catalog: a catalog of developer command guides
//!
//! Guides are markdown files with a frontmatter block. Each upload goes
//! through one ingestion pipeline (file-type check, frontmatter parsing and
//! validation, category policy, store insert) and yields exactly one
//! outcome: the accepted command or the first reason it was rejected.
//! Accepted commands are listed, searched and rendered over HTTP.

pub mod catalog;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod providers;
pub mod render;
pub mod server;
pub mod storage;
pub mod types;

pub use config::CatalogConfig;
pub use error::{Error, IngestError, Result, ValidationError};
pub use ingestion::{CategoryPolicy, IngestOutcome, IngestPipeline, RawDocument};
pub use providers::{CommandStore, StoreError};
pub use types::{CommandRecord, ListQuery, ParsedCommand};
