//! Error types for the command catalog
//!
//! Three layers of errors live here:
//! - [`ValidationError`]: what the frontmatter parser reports for one document
//! - [`IngestError`]: the rejection kinds of one ingestion attempt
//! - [`Error`]: infrastructure failures (config, I/O, database, routing)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::providers::StoreError;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pattern a command id must match
pub const ID_PATTERN: &str = "^[a-z0-9]+(-[a-z0-9]+)*$";

/// Catalog infrastructure errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Command not found
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Document store error outside of an ingestion
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error", msg.clone()),
            Error::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "database_error",
                    "The command store is currently unavailable".to_string(),
                )
            }
            Error::CommandNotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Command not found: {}", id),
            ),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            Error::Store(err) => {
                tracing::error!("Store error: {}", err);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store_unavailable",
                    "The command store is currently unavailable".to_string(),
                )
            }
            Error::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error", err.to_string()),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Toml(err) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error", err.to_string()),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Rejection reported by the frontmatter parser
///
/// Exactly one is returned per call: the first check that fails, in the
/// order structure, required fields, tags, id.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No `---` delimited block at the top of the document
    #[error("Missing or malformed frontmatter block (expected --- metadata --- at the top of the file)")]
    MalformedStructure,

    /// Required keys absent or empty
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Tags field yields nothing after normalization
    #[error("At least one tag is required")]
    EmptyTags,

    /// Id is not kebab-case
    #[error("Invalid id '{0}': must be kebab-case matching ^[a-z0-9]+(-[a-z0-9]+)*$ (e.g. 'docker-basics')")]
    InvalidId(String),
}

impl ValidationError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedStructure => "malformed_structure",
            Self::MissingFields(_) => "missing_fields",
            Self::EmptyTags => "empty_tags",
            Self::InvalidId(_) => "invalid_id",
        }
    }
}

/// Rejection of a single ingestion attempt
///
/// None of these are fatal to the process; the caller reports the message
/// and the user may resubmit.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File name or declared type is not markdown
    #[error("Unsupported file type '{0}': please upload a .md (Markdown) file")]
    UnsupportedFileType(String),

    /// Content could not be read as UTF-8 text
    #[error("Could not read file content: {0}")]
    UnreadableContent(String),

    /// Parser rejection, propagated unchanged
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Category outside the configured allowed set
    #[error("Invalid category '{category}'. Must be one of: {}", .allowed.join(", "))]
    UnknownCategory {
        category: String,
        allowed: Vec<String>,
    },

    /// Store rejected the id as already present
    #[error("A command with id '{0}' already exists")]
    DuplicateId(String),

    /// Any other store failure; the cause is kept for logging only
    #[error("The command store is currently unavailable, please try again later")]
    StoreUnavailable(#[source] StoreError),
}

impl IngestError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedFileType(_) => "unsupported_file_type",
            Self::UnreadableContent(_) => "unreadable_content",
            Self::Validation(err) => err.kind(),
            Self::UnknownCategory { .. } => "unknown_category",
            Self::DuplicateId(_) => "duplicate_id",
            Self::StoreUnavailable(_) => "store_unavailable",
        }
    }

    /// HTTP status for this rejection
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::UnreadableContent(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) | Self::UnknownCategory { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::DuplicateId(_) => StatusCode::CONFLICT,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let mut error = json!({
            "type": self.kind(),
            "message": self.to_string(),
        });

        match &self {
            IngestError::Validation(ValidationError::MissingFields(missing)) => {
                error["missing"] = json!(missing);
            }
            IngestError::UnknownCategory { allowed, .. } => {
                error["allowed"] = json!(allowed);
            }
            IngestError::DuplicateId(id) => {
                error["id"] = json!(id);
            }
            _ => {}
        }

        (self.status_code(), Json(json!({ "error": error }))).into_response()
    }
}
