//! User API endpoints

use api_types::user::{UserUpsert, UserView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_user(user: store::User) -> UserView {
    UserView {
        id: user.id,
        name: user.name,
        created_at: user.created_at.fixed_offset(),
        updated_at: user.updated_at.fixed_offset(),
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<UserView>>, ServerError> {
    let users = state.store.users().await?;

    Ok(Json(users.into_iter().map(map_user).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserView>, ServerError> {
    let user = state.store.user(id).await?;

    Ok(Json(map_user(user)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserUpsert>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state.store.new_user(&payload.name).await?;

    Ok((StatusCode::CREATED, Json(map_user(user))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserUpsert>,
) -> Result<Json<UserView>, ServerError> {
    let user = state.store.update_user(id, &payload.name).await?;

    Ok(Json(map_user(user)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.store.delete_user(id).await?;

    Ok(StatusCode::OK)
}
