//! Changelog entry API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{ChangelogEntry, CreateEntryRequest, ReactionKind, UpdateEntryRequest};
use crate::AppState;

/// Request body for adding a reaction.
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionRequest {
    #[serde(rename = "type")]
    pub kind: String,
}

/// GET /api/entries - List all entries, most recent first.
pub async fn list_entries(State(state): State<AppState>) -> ApiResult<Vec<ChangelogEntry>> {
    let revision_id = state.store.revision().await.revision_id;
    success(state.store.list().await, revision_id)
}

/// GET /api/entries/:id - Get a single entry.
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ChangelogEntry> {
    let revision_id = state.store.revision().await.revision_id;

    match state.store.get(&id).await {
        Some(entry) => success(entry, revision_id),
        None => error(AppError::entry_not_found(&id), revision_id),
    }
}

/// POST /api/entries - Create a new entry.
pub async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateEntryRequest>,
) -> ApiResult<ChangelogEntry> {
    let revision_id = state.store.revision().await.revision_id;

    if let Err(e) = request.validate() {
        return error(e, revision_id);
    }

    let created = state.store.create_revised(&request).await;
    tracing::info!(
        "Published changelog entry {} ({})",
        created.value.id,
        created.value.version
    );

    success(created.value, created.revision_id)
}

/// PUT /api/entries/:id - Partially update an entry.
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateEntryRequest>,
) -> ApiResult<ChangelogEntry> {
    let revision_id = state.store.revision().await.revision_id;

    if let Err(e) = request.validate() {
        return error(e, revision_id);
    }

    match state.store.update_revised(&id, &request).await {
        Some(updated) => success(updated.value, updated.revision_id),
        None => error(AppError::entry_not_found(&id), revision_id),
    }
}

/// DELETE /api/entries/:id - Delete an entry.
pub async fn delete_entry(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let revision_id = state.store.revision().await.revision_id;

    let Some(removed) = state.store.delete_revised(&id).await else {
        return error(AppError::entry_not_found(&id), revision_id);
    };

    tracing::info!("Deleted changelog entry {}", id);
    success((), removed.revision_id)
}

/// POST /api/entries/:id/reactions - Add one reaction of the given kind.
pub async fn add_reaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ReactionRequest>,
) -> ApiResult<ChangelogEntry> {
    let revision_id = state.store.revision().await.revision_id;

    let Some(kind) = ReactionKind::from_symbol(&request.kind) else {
        return error(
            AppError::BadRequest(format!("Unknown reaction type {}", request.kind)),
            revision_id,
        );
    };

    match state.store.add_reaction_revised(&id, kind).await {
        Some(reacted) => success(reacted.value, reacted.revision_id),
        None => error(AppError::entry_not_found(&id), revision_id),
    }
}
