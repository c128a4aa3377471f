//! Group API endpoints

use api_types::group::{GroupOverview, GroupUpsert, GroupView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, expenses, server::ServerState};

fn map_group(group: store::Group) -> GroupView {
    GroupView {
        id: group.id,
        name: group.name,
        created_at: group.created_at.fixed_offset(),
        updated_at: group.updated_at.fixed_offset(),
    }
}

fn map_overview(group: store::Group) -> GroupOverview {
    GroupOverview {
        id: group.id,
        name: group.name,
        created_at: group.created_at.fixed_offset(),
        updated_at: group.updated_at.fixed_offset(),
        expenses: group.expenses.into_iter().map(expenses::map_row).collect(),
    }
}

/// List live groups, newest first, each with its live expenses embedded.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<GroupOverview>>, ServerError> {
    let groups = state.store.groups().await?;

    Ok(Json(groups.into_iter().map(map_overview).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GroupView>, ServerError> {
    let group = state.store.group(id).await?;

    Ok(Json(map_group(group)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GroupUpsert>,
) -> Result<(StatusCode, Json<GroupView>), ServerError> {
    let group = state.store.new_group(&payload.name).await?;

    Ok((StatusCode::CREATED, Json(map_group(group))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GroupUpsert>,
) -> Result<Json<GroupView>, ServerError> {
    let group = state.store.update_group(id, &payload.name).await?;

    Ok(Json(map_group(group)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.store.delete_group(id).await?;

    Ok(StatusCode::OK)
}
