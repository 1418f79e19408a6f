//! Command upload endpoint

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::ingestion::RawDocument;
use crate::server::state::AppState;
use crate::types::IngestResponse;

/// POST /api/commands - Upload one markdown guide
///
/// The first multipart field carrying a file name is ingested; other fields
/// are ignored. The ingestion runs on its own task so a client that hangs up
/// cannot cancel a store insert halfway.
pub async fn upload_command(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let start = Instant::now();

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        let content_type = field.content_type().map(|s| s.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::BadRequest(format!("Failed to read file {}: {}", filename, e)))?;

        tracing::info!("Received upload: {} ({} bytes)", filename, data.len());
        file = Some(RawDocument::from_bytes(filename, content_type, data));
        break;
    }

    let file = file.ok_or_else(|| Error::BadRequest("No file in upload".to_string()))?;
    let filename = file.filename.clone();

    let pipeline = state.pipeline().clone();
    let outcome = tokio::spawn(async move { pipeline.ingest(file).await })
        .await
        .map_err(|e| Error::internal(format!("Ingestion task failed: {}", e)))?;

    let response = match outcome {
        Ok(command) => (
            StatusCode::CREATED,
            Json(IngestResponse {
                success: true,
                command,
                filename,
                processing_time_ms: start.elapsed().as_millis() as u64,
            }),
        )
            .into_response(),
        Err(rejection) => rejection.into_response(),
    };

    Ok(response)
}
