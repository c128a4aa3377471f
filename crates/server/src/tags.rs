//! Tag API endpoints

use api_types::tag::{TagUpsert, TagView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub(crate) fn map_tag(tag: store::Tag) -> TagView {
    TagView {
        id: tag.id,
        name: tag.name,
        color: tag.color,
        created_at: tag.created_at.fixed_offset(),
        updated_at: tag.updated_at.fixed_offset(),
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<TagView>>, ServerError> {
    let tags = state.store.tags().await?;

    Ok(Json(tags.into_iter().map(map_tag).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TagView>, ServerError> {
    let tag = state.store.tag(id).await?;

    Ok(Json(map_tag(tag)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TagUpsert>,
) -> Result<(StatusCode, Json<TagView>), ServerError> {
    let tag = state.store.new_tag(&payload.name, &payload.color).await?;

    Ok((StatusCode::CREATED, Json(map_tag(tag))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TagUpsert>,
) -> Result<Json<TagView>, ServerError> {
    let tag = state
        .store
        .update_tag(id, &payload.name, &payload.color)
        .await?;

    Ok(Json(map_tag(tag)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.store.delete_tag(id).await?;

    Ok(StatusCode::OK)
}
