//! Command listing, detail and category endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{
    CategoryListResponse, CommandDetail, CommandListResponse, CommandSummary, ListQuery,
};

/// GET /api/commands - List commands, newest first
pub async fn list_commands(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CommandListResponse>> {
    let records = state.listing().search(&query).await?;
    let commands: Vec<CommandSummary> = records.iter().map(CommandSummary::from).collect();

    Ok(Json(CommandListResponse {
        total_count: commands.len(),
        commands,
        query: query.search_term(),
        category: query.category_filter().map(str::to_string),
    }))
}

/// GET /api/commands/:id - One command with rendered body
pub async fn get_command(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CommandDetail>> {
    let record = state
        .store()
        .get(&id)
        .await?
        .ok_or_else(|| Error::CommandNotFound(id.clone()))?;

    let html = state.renderer().render(&record.command.content);

    Ok(Json(CommandDetail { record, html }))
}

/// GET /api/categories - Categories available for filtering
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<CategoryListResponse>> {
    let policy = state.pipeline().policy();
    let categories = state.listing().categories(policy).await?;

    Ok(Json(CategoryListResponse {
        categories,
        mode: policy.mode().to_string(),
    }))
}
