use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{Expense, Group, ResultStore, StoreError, expenses, groups};

use super::{Store, normalize_required_name, with_tx};

impl Store {
    /// Return every live group, newest first, with its live expenses embedded.
    ///
    /// The embedded expenses are plain rows (payer, payment method and tags
    /// left unhydrated); the overview screen only needs ids and amounts.
    /// They are loaded in one batched query across all groups.
    pub async fn groups(&self) -> ResultStore<Vec<Group>> {
        with_tx!(self, |db_tx| {
            let group_models = groups::Entity::find()
                .filter(groups::Column::DeletedAt.is_null())
                .order_by_desc(groups::Column::CreatedAt)
                .all(&db_tx)
                .await?;

            let group_ids: Vec<String> = group_models.iter().map(|m| m.id.clone()).collect();
            let expense_models = expenses::Entity::find()
                .filter(expenses::Column::GroupId.is_in(group_ids))
                .filter(expenses::Column::DeletedAt.is_null())
                .order_by_desc(expenses::Column::CreatedAt)
                .all(&db_tx)
                .await?;

            let mut by_group: HashMap<String, Vec<Expense>> = HashMap::new();
            for model in expense_models {
                let group_id = model.group_id.clone();
                by_group
                    .entry(group_id)
                    .or_default()
                    .push(Expense::try_from(model)?);
            }

            let mut result = Vec::with_capacity(group_models.len());
            for model in group_models {
                let id = model.id.clone();
                let mut group = Group::try_from(model)?;
                group.expenses = by_group.remove(&id).unwrap_or_default();
                result.push(group);
            }
            Ok(result)
        })
    }

    /// Return a live group by id.
    ///
    /// The `expenses` field stays empty; fetch the hydrated rows with
    /// [`Store::group_expenses`].
    pub async fn group(&self, group_id: Uuid) -> ResultStore<Group> {
        with_tx!(self, |db_tx| self.require_live_group(&db_tx, group_id).await)
    }

    /// Add a new group.
    pub async fn new_group(&self, name: &str) -> ResultStore<Group> {
        let name = normalize_required_name(name, "group")?;
        with_tx!(self, |db_tx| {
            let group = Group::new(name)?;
            let model: groups::ActiveModel = (&group).into();
            model.insert(&db_tx).await?;
            Ok(group)
        })
    }

    /// Rename an existing group and stamp `updated_at`.
    pub async fn update_group(&self, group_id: Uuid, name: &str) -> ResultStore<Group> {
        let name = normalize_required_name(name, "group")?;
        with_tx!(self, |db_tx| {
            self.require_live_group(&db_tx, group_id).await?;
            let active = groups::ActiveModel {
                id: ActiveValue::Set(group_id.to_string()),
                name: ActiveValue::Set(name),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let model = active.update(&db_tx).await?;
            Group::try_from(model)
        })
    }

    /// Soft delete a group. Its expenses are left untouched; the group
    /// simply disappears from the overview.
    pub async fn delete_group(&self, group_id: Uuid) -> ResultStore<()> {
        with_tx!(self, |db_tx| {
            groups::Entity::find_by_id(group_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| StoreError::NotFound("group not exists".to_string()))?;
            let active = groups::ActiveModel {
                id: ActiveValue::Set(group_id.to_string()),
                deleted_at: ActiveValue::Set(Some(Utc::now())),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    pub(crate) async fn require_live_group<C>(&self, db: &C, group_id: Uuid) -> ResultStore<Group>
    where
        C: ConnectionTrait,
    {
        let model = groups::Entity::find_by_id(group_id.to_string())
            .filter(groups::Column::DeletedAt.is_null())
            .one(db)
            .await?
            .ok_or_else(|| StoreError::NotFound("group not exists".to_string()))?;
        Group::try_from(model)
    }
}
