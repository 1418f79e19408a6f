//! Command guide types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A validated command guide, ready to be persisted
///
/// Built only by the frontmatter parser; it is either accepted by the store
/// or discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// Kebab-case identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// One-line description
    pub description: String,
    /// Category name
    pub category: String,
    /// Lowercase tags, at least one
    pub tags: Vec<String>,
    /// Markdown body
    pub content: String,
}

impl ParsedCommand {
    /// Render this command as a frontmatter document
    ///
    /// Parsing the result yields a command equal to `self`.
    pub fn to_markdown(&self) -> String {
        format!(
            "---\nid: {}\ntitle: {}\ndescription: {}\ncategory: {}\ntags: {}\n---\n{}\n",
            self.id,
            self.title,
            self.description,
            self.category,
            self.tags.join(", "),
            self.content
        )
    }
}

/// A command as persisted by a document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Store-assigned surrogate key
    pub key: Uuid,
    /// The validated command
    #[serde(flatten)]
    pub command: ParsedCommand,
    /// When the store accepted the command
    pub created_at: DateTime<Utc>,
}

impl CommandRecord {
    /// Wrap a command with fresh store metadata
    pub fn new(command: ParsedCommand) -> Self {
        Self {
            key: Uuid::new_v4(),
            command,
            created_at: Utc::now(),
        }
    }

    /// Command id
    pub fn id(&self) -> &str {
        &self.command.id
    }
}
