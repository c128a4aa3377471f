//! Expense API endpoints

use api_types::expense::{
    ExpenseNew, ExpenseRow, ExpenseUpdate, ExpenseView, PayerRef, PaymentMethodRef, TagsReplace,
};
use api_types::tag::TagView;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, tags};

pub(crate) fn map_row(expense: store::Expense) -> ExpenseRow {
    ExpenseRow {
        id: expense.id,
        group_id: expense.group_id,
        user_id: expense.user_id,
        payment_method_id: expense.payment_method_id,
        name: expense.name,
        amount_cents: expense.amount_cents,
        created_at: expense.created_at.fixed_offset(),
        updated_at: expense.updated_at.fixed_offset(),
    }
}

fn map_expense(expense: store::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        group_id: expense.group_id,
        user_id: expense.user_id,
        payment_method_id: expense.payment_method_id,
        name: expense.name,
        amount_cents: expense.amount_cents,
        created_at: expense.created_at.fixed_offset(),
        updated_at: expense.updated_at.fixed_offset(),
        payer: expense.payer.map(|payer| PayerRef {
            id: payer.id,
            name: payer.name,
        }),
        payment_method: expense.payment_method.map(|method| PaymentMethodRef {
            id: method.id,
            name: method.name,
            color: method.color,
        }),
        tags: expense.tags.into_iter().map(tags::map_tag).collect(),
    }
}

/// List live expenses of a group, newest first. The `id` is the group id.
pub async fn list_for_group(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state.store.group_expenses(id).await?;

    Ok(Json(expenses.into_iter().map(map_expense).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state.store.expense(id).await?;

    Ok(Json(map_expense(expense)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let expense = state
        .store
        .new_expense(
            payload.group_id,
            payload.user_id,
            payload.payment_method_id,
            &payload.name,
            payload.amount_cents,
            &payload.tag_ids,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state
        .store
        .update_expense(
            id,
            payload.user_id,
            payload.payment_method_id,
            &payload.name,
            payload.amount_cents,
            &payload.tag_ids,
        )
        .await?;

    Ok(Json(map_expense(expense)))
}

/// Replace the whole tag set of an expense. An empty list clears it.
pub async fn replace_tags(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TagsReplace>,
) -> Result<Json<Vec<TagView>>, ServerError> {
    let replaced = state.store.replace_tags(id, &payload.tag_ids).await?;

    Ok(Json(replaced.into_iter().map(tags::map_tag).collect()))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.store.delete_expense(id).await?;

    Ok(StatusCode::OK)
}
