//! Response types for the catalog API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::command::{CommandRecord, ParsedCommand};

/// Command as shown in a listing (no body)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&CommandRecord> for CommandSummary {
    fn from(record: &CommandRecord) -> Self {
        Self {
            id: record.command.id.clone(),
            title: record.command.title.clone(),
            description: record.command.description.clone(),
            category: record.command.category.clone(),
            tags: record.command.tags.clone(),
            created_at: record.created_at,
        }
    }
}

/// Listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandListResponse {
    /// Matching commands, newest first
    pub commands: Vec<CommandSummary>,
    /// Number of matching commands
    pub total_count: usize,
    /// Search term echoed back (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Category filter echoed back (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Full command with rendered body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDetail {
    #[serde(flatten)]
    pub record: CommandRecord,
    /// HTML rendered from `content`
    pub html: String,
}

/// Successful upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub success: bool,
    /// The accepted command
    pub command: ParsedCommand,
    /// Uploaded filename
    pub filename: String,
    pub processing_time_ms: u64,
}

/// Categories available for filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListResponse {
    /// "All" followed by the known categories, sorted
    pub categories: Vec<String>,
    /// Category policy mode ("open" or "restricted")
    pub mode: String,
}
