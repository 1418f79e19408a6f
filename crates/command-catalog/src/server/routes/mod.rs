//! API routes for the catalog server

pub mod commands;
pub mod ingest;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Listing and upload share a path; upload gets the body limit
        .route(
            "/commands",
            get(commands::list_commands)
                .post(ingest::upload_command)
                .layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/commands/:id", get(commands::get_command))
        .route("/categories", get(commands::list_categories))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "command-catalog",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Catalog of command guides ingested from markdown with frontmatter",
        "endpoints": {
            "GET /api/commands": "List commands (?q= search, ?category= filter)",
            "GET /api/commands/:id": "Get one command with rendered HTML",
            "POST /api/commands": "Upload a .md guide (multipart)",
            "GET /api/categories": "List categories available for filtering"
        },
        "frontmatter": {
            "required": crate::ingestion::REQUIRED_FIELDS,
            "id_pattern": crate::error::ID_PATTERN
        }
    }))
}
