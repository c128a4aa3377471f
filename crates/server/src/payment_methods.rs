//! Payment method API endpoints

use api_types::payment_method::{PaymentMethodUpsert, PaymentMethodView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_method(method: store::PaymentMethod) -> PaymentMethodView {
    PaymentMethodView {
        id: method.id,
        name: method.name,
        color: method.color,
        created_at: method.created_at.fixed_offset(),
        updated_at: method.updated_at.fixed_offset(),
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<PaymentMethodView>>, ServerError> {
    let methods = state.store.payment_methods().await?;

    Ok(Json(methods.into_iter().map(map_method).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentMethodView>, ServerError> {
    let method = state.store.payment_method(id).await?;

    Ok(Json(map_method(method)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentMethodUpsert>,
) -> Result<(StatusCode, Json<PaymentMethodView>), ServerError> {
    let method = state
        .store
        .new_payment_method(&payload.name, &payload.color)
        .await?;

    Ok((StatusCode::CREATED, Json(map_method(method))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentMethodUpsert>,
) -> Result<Json<PaymentMethodView>, ServerError> {
    let method = state
        .store
        .update_payment_method(id, &payload.name, &payload.color)
        .await?;

    Ok(Json(map_method(method)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.store.delete_payment_method(id).await?;

    Ok(StatusCode::OK)
}
