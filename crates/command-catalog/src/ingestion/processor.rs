//! Ingestion pipeline orchestration
//!
//! One call to [`IngestPipeline::ingest`] takes one uploaded file through the
//! boundary check, read, parse, category policy and store insert, and
//! reports a single outcome.

use std::sync::Arc;

use crate::error::IngestError;
use crate::providers::{CommandStore, StoreError};
use crate::types::ParsedCommand;

use super::frontmatter;
use super::policy::CategoryPolicy;
use super::source::RawDocument;

/// Result of one ingestion attempt: the accepted command or the reason it
/// was rejected
pub type IngestOutcome = std::result::Result<ParsedCommand, IngestError>;

/// Extensions accepted when none are configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["md"];

/// Observer notified after a command has been stored
///
/// Listing caches implement this to drop stale snapshots.
pub trait IngestListener: Send + Sync {
    fn on_accepted(&self, command: &ParsedCommand);
}

/// Main ingestion pipeline
pub struct IngestPipeline {
    /// Persistence collaborator
    store: Arc<dyn CommandStore>,
    /// Category acceptance rule
    policy: CategoryPolicy,
    /// Lowercase extensions accepted at the boundary
    extensions: Vec<String>,
    /// Success observers
    listeners: Vec<Arc<dyn IngestListener>>,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline
    pub fn new(store: Arc<dyn CommandStore>, policy: CategoryPolicy) -> Self {
        Self {
            store,
            policy,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            listeners: Vec::new(),
        }
    }

    /// Replace the accepted extensions
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Register a success observer
    pub fn with_listener(mut self, listener: Arc<dyn IngestListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Category policy in effect
    pub fn policy(&self) -> &CategoryPolicy {
        &self.policy
    }

    /// Reject files that are not markdown before reading them
    pub fn check_file_type(&self, file: &RawDocument) -> Result<(), IngestError> {
        let extension_ok = file
            .extension()
            .map(|ext| self.extensions.iter().any(|allowed| *allowed == ext))
            .unwrap_or(false);

        if !extension_ok || !file.declares_text() {
            return Err(IngestError::UnsupportedFileType(file.filename.clone()));
        }

        Ok(())
    }

    /// Parse and validate without touching the store
    pub fn validate(&self, raw: &str) -> IngestOutcome {
        let command = frontmatter::parse(raw)?;
        self.policy.check(&command.category)?;
        Ok(command)
    }

    /// Full ingestion: boundary check, read, validate, persist
    pub async fn ingest(&self, file: RawDocument) -> IngestOutcome {
        let outcome = self.run(&file).await;

        match &outcome {
            Ok(command) => {
                tracing::info!(
                    "Accepted command '{}' ({}) from {}",
                    command.id,
                    command.category,
                    file.filename
                );
                for listener in &self.listeners {
                    listener.on_accepted(command);
                }
            }
            Err(IngestError::StoreUnavailable(cause)) => {
                tracing::error!(
                    "Store '{}' failed while ingesting {}: {}",
                    self.store.name(),
                    file.filename,
                    cause
                );
            }
            Err(e) => {
                tracing::warn!("Rejected {}: {}", file.filename, e);
            }
        }

        outcome
    }

    async fn run(&self, file: &RawDocument) -> IngestOutcome {
        self.check_file_type(file)?;

        let raw = file.read_text().await?;
        let command = self.validate(&raw)?;

        match self.store.insert(&command).await {
            Ok(record) => {
                tracing::debug!("Stored '{}' with key {}", record.command.id, record.key);
                Ok(command)
            }
            Err(StoreError::Duplicate(_)) => Err(IngestError::DuplicateId(command.id)),
            Err(e) => Err(IngestError::StoreUnavailable(e)),
        }
    }
}
